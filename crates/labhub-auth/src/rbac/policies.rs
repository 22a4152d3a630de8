//! Role-to-capability grant table.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use labhub_entity::reviewer::ReviewerRole;

/// A mutating action a reviewer may be allowed to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Move a project into `approved`.
    Approve,
    /// Move a project into `rejected`.
    Reject,
    /// Correct a project's status freely, including out of `completed`.
    Edit,
    /// Delete a project.
    Delete,
}

impl Capability {
    /// Every capability.
    pub const ALL: [Capability; 4] = [Self::Approve, Self::Reject, Self::Edit, Self::Delete];
}

/// Capabilities a role implies regardless of the actor's permission bag.
///
/// Roles absent from the table grant nothing by themselves and rely on the
/// bag alone.
#[derive(Debug, Clone)]
pub struct RolePolicies {
    /// Role → implied capabilities.
    grants: HashMap<ReviewerRole, HashSet<Capability>>,
}

impl RolePolicies {
    /// The default table: only `super_admin` carries implicit grants.
    pub fn new() -> Self {
        let mut grants = HashMap::new();
        grants.insert(
            ReviewerRole::SuperAdmin,
            Capability::ALL.into_iter().collect::<HashSet<_>>(),
        );
        Self { grants }
    }

    /// An empty table, for callers that build their own grants.
    pub fn empty() -> Self {
        Self {
            grants: HashMap::new(),
        }
    }

    /// Add an implied capability to a role.
    ///
    /// `view_only` cannot be granted anything; the call is ignored.
    pub fn grant(mut self, role: ReviewerRole, capability: Capability) -> Self {
        if !role.is_view_only() {
            self.grants.entry(role).or_default().insert(capability);
        }
        self
    }

    /// Check whether the role implies the capability.
    pub fn role_grants(&self, role: &ReviewerRole, capability: Capability) -> bool {
        self.grants
            .get(role)
            .map(|caps| caps.contains(&capability))
            .unwrap_or(false)
    }
}

impl Default for RolePolicies {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_only_super_admin() {
        let policies = RolePolicies::new();
        for cap in Capability::ALL {
            assert!(policies.role_grants(&ReviewerRole::SuperAdmin, cap));
            assert!(!policies.role_grants(&ReviewerRole::Admin, cap));
            assert!(!policies.role_grants(&ReviewerRole::Faculty, cap));
        }
    }

    #[test]
    fn test_view_only_cannot_be_granted() {
        let policies = RolePolicies::empty().grant(ReviewerRole::ViewOnly, Capability::Edit);
        assert!(!policies.role_grants(&ReviewerRole::ViewOnly, Capability::Edit));
    }
}
