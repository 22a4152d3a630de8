//! Transition table listing.

use serde::Serialize;
use tabled::Tabled;

use labhub_auth::rbac::{Capability, Requirement};
use labhub_core::error::AppError;
use labhub_service::TransitionTable;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct EdgeRow {
    from: String,
    to: String,
    requires: String,
    comments: String,
}

fn describe(requirement: Requirement) -> String {
    let name = |c: Capability| format!("{c:?}").to_lowercase();
    match requirement {
        Requirement::Has(c) => name(c),
        Requirement::Either(a, b) => format!("{} or {}", name(a), name(b)),
        Requirement::Both(a, b) => format!("{} and {}", name(a), name(b)),
    }
}

/// Print every edge of the standard table.
pub fn execute(format: OutputFormat) -> Result<(), AppError> {
    let table = TransitionTable::standard();
    let rows: Vec<EdgeRow> = table
        .edges()
        .into_iter()
        .map(|(from, to, rule)| EdgeRow {
            from: from.to_string(),
            to: to.to_string(),
            requires: describe(rule.requirement),
            comments: if rule.comments_required { "required" } else { "optional" }.to_string(),
        })
        .collect();
    output::print_list(&rows, &rows, format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe(Requirement::Has(Capability::Edit)), "edit");
        assert_eq!(
            describe(Requirement::Either(Capability::Approve, Capability::Edit)),
            "approve or edit"
        );
    }
}
