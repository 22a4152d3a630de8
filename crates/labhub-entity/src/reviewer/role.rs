//! Reviewer role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles known to the review workflow.
///
/// The set is open: any role string the identity provider sends that is not
/// listed here parses to [`ReviewerRole::Unknown`] and is granted nothing by
/// role alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    /// Implicitly holds every capability.
    SuperAdmin,
    /// Lab administrator.
    Admin,
    /// Faculty reviewer.
    Faculty,
    /// Read-only access; always denied mutating actions.
    ViewOnly,
    /// Any other role string.
    #[serde(other)]
    Unknown,
}

impl ReviewerRole {
    /// Return the role as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Faculty => "faculty",
            Self::ViewOnly => "view_only",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this role is barred from every mutating action.
    pub fn is_view_only(&self) -> bool {
        matches!(self, Self::ViewOnly)
    }
}

impl fmt::Display for ReviewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReviewerRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().replace('-', "_").as_str() {
            "super_admin" | "superadmin" => Self::SuperAdmin,
            "admin" => Self::Admin,
            "faculty" => Self::Faculty,
            "view_only" | "viewonly" | "viewer" => Self::ViewOnly,
            _ => Self::Unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes() {
        assert_eq!("Super-Admin".parse::<ReviewerRole>(), Ok(ReviewerRole::SuperAdmin));
        assert_eq!("view_only".parse::<ReviewerRole>(), Ok(ReviewerRole::ViewOnly));
        assert_eq!("lab_assistant".parse::<ReviewerRole>(), Ok(ReviewerRole::Unknown));
    }

    #[test]
    fn test_serde_unknown_role() {
        let role: ReviewerRole = serde_json::from_str("\"technician\"").expect("deserialize");
        assert_eq!(role, ReviewerRole::Unknown);
        let role: ReviewerRole = serde_json::from_str("\"faculty\"").expect("deserialize");
        assert_eq!(role, ReviewerRole::Faculty);
    }
}
