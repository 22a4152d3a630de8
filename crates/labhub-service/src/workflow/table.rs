//! Transition table: every (from, to) status pair with its gates.
//!
//! Any status may move to any other. The table only decides which
//! capability the move needs and whether comments are mandatory.

use std::collections::HashMap;

use serde::Serialize;

use labhub_auth::rbac::{Capability, Requirement};
use labhub_entity::project::ProjectStatus;

/// Gates on one transition edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionRule {
    /// Capability the actor must hold.
    pub requirement: Requirement,
    /// Whether non-blank comments must accompany the transition.
    pub comments_required: bool,
}

/// Lookup of rules for all 25 status pairs.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    rules: HashMap<(ProjectStatus, ProjectStatus), TransitionRule>,
}

impl TransitionTable {
    /// The standard review table.
    pub fn standard() -> Self {
        let mut rules = HashMap::new();
        for from in ProjectStatus::ALL {
            for to in ProjectStatus::ALL {
                rules.insert((from, to), standard_rule(from, to));
            }
        }
        Self { rules }
    }

    /// Rule for moving from `from` to `to`.
    pub fn rule(&self, from: ProjectStatus, to: ProjectStatus) -> Option<&TransitionRule> {
        self.rules.get(&(from, to))
    }

    /// Every edge with its rule, ordered by status pipeline order.
    pub fn edges(&self) -> Vec<(ProjectStatus, ProjectStatus, TransitionRule)> {
        let mut edges = Vec::with_capacity(self.rules.len());
        for from in ProjectStatus::ALL {
            for to in ProjectStatus::ALL {
                if let Some(rule) = self.rules.get(&(from, to)) {
                    edges.push((from, to, *rule));
                }
            }
        }
        edges
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_rule(from: ProjectStatus, to: ProjectStatus) -> TransitionRule {
    use Capability::{Approve, Edit, Reject};
    use ProjectStatus::*;

    let leaves_completed = from == Completed && to != Completed;
    let requirement = match to {
        Approved if leaves_completed => Requirement::Both(Edit, Approve),
        Rejected if leaves_completed => Requirement::Both(Edit, Reject),
        Approved => Requirement::Has(Approve),
        Rejected => Requirement::Has(Reject),
        Pending | UnderReview if leaves_completed => Requirement::Has(Edit),
        Pending | UnderReview => Requirement::Either(Approve, Edit),
        // Closing out a decided or already completed project is routine.
        Completed if matches!(from, Approved | Rejected | Completed) => Requirement::Either(Approve, Edit),
        // Anything else jumping straight to completed is a correction.
        Completed => Requirement::Has(Edit),
    };

    TransitionRule {
        requirement,
        comments_required: to.is_decision(),
    }
}
