//! The actor → capability-set function.

use serde::{Deserialize, Serialize};

use labhub_entity::reviewer::{Actor, PermissionBag};

use super::policies::{Capability, RolePolicies};

/// The resolved capability set of one actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub approve: bool,
    pub reject: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Capabilities {
    /// Every capability granted.
    pub const ALL: Capabilities = Capabilities {
        approve: true,
        reject: true,
        edit: true,
        delete: true,
    };

    /// No capability granted.
    pub const NONE: Capabilities = Capabilities {
        approve: false,
        reject: false,
        edit: false,
        delete: false,
    };

    /// Check a single capability.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Approve => self.approve,
            Capability::Reject => self.reject,
            Capability::Edit => self.edit,
            Capability::Delete => self.delete,
        }
    }

    /// Whether any mutating capability is held.
    pub fn any(&self) -> bool {
        Capability::ALL.into_iter().any(|c| self.has(c))
    }

    /// Check a composite requirement.
    pub fn satisfies(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Has(c) => self.has(c),
            Requirement::Either(a, b) => self.has(a) || self.has(b),
            Requirement::Both(a, b) => self.has(a) && self.has(b),
        }
    }
}

/// What an action demands of the actor's capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "capabilities")]
pub enum Requirement {
    /// One capability.
    Has(Capability),
    /// At least one of two.
    Either(Capability, Capability),
    /// Both of two.
    Both(Capability, Capability),
}

/// Resolve an actor's capabilities with the default role table.
///
/// Total: never fails. `None` (no resolved actor) yields no capabilities.
pub fn capabilities(actor: Option<&Actor>) -> Capabilities {
    resolve(&RolePolicies::default(), actor)
}

/// Resolve an actor's capabilities against a specific role table.
///
/// - `view_only` gets nothing, whatever its bag says.
/// - Otherwise each capability is held if the role implies it or the bag
///   sets the matching flag. Rejecting rides on the `can_approve` flag.
pub fn resolve(policies: &RolePolicies, actor: Option<&Actor>) -> Capabilities {
    let Some(actor) = actor else {
        return Capabilities::NONE;
    };
    if actor.role.is_some_and(|r| r.is_view_only()) {
        return Capabilities::NONE;
    }

    let bag = actor.permissions.unwrap_or_default();
    let by_role = |c: Capability| {
        actor
            .role
            .as_ref()
            .is_some_and(|r| policies.role_grants(r, c))
    };
    let by_bag = |c: Capability, bag: &PermissionBag| match c {
        Capability::Approve | Capability::Reject => bag.can_approve,
        Capability::Edit => bag.can_edit,
        Capability::Delete => bag.can_delete,
    };
    let held = |c: Capability| by_role(c) || by_bag(c, &bag);

    Capabilities {
        approve: held(Capability::Approve),
        reject: held(Capability::Reject),
        edit: held(Capability::Edit),
        delete: held(Capability::Delete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labhub_entity::reviewer::ReviewerRole;
    use uuid::Uuid;

    fn actor(role: ReviewerRole, bag: PermissionBag) -> Actor {
        Actor::new(Uuid::new_v4(), role, bag)
    }

    const FULL_BAG: PermissionBag = PermissionBag {
        can_approve: true,
        can_edit: true,
        can_delete: true,
    };

    #[test]
    fn test_super_admin_has_everything_with_empty_bag() {
        let caps = capabilities(Some(&actor(ReviewerRole::SuperAdmin, PermissionBag::default())));
        assert_eq!(caps, Capabilities::ALL);
    }

    #[test]
    fn test_view_only_denied_despite_bag() {
        let caps = capabilities(Some(&actor(ReviewerRole::ViewOnly, FULL_BAG)));
        assert_eq!(caps, Capabilities::NONE);
        assert!(!caps.any());
    }

    #[test]
    fn test_admin_relies_on_bag() {
        let bag = PermissionBag {
            can_approve: true,
            ..PermissionBag::default()
        };
        let caps = capabilities(Some(&actor(ReviewerRole::Admin, bag)));
        assert!(caps.approve);
        assert!(caps.reject);
        assert!(!caps.edit);
        assert!(!caps.delete);

        let caps = capabilities(Some(&actor(ReviewerRole::Admin, PermissionBag::default())));
        assert_eq!(caps, Capabilities::NONE);
    }

    #[test]
    fn test_missing_actor_or_bag_yields_nothing() {
        assert_eq!(capabilities(None), Capabilities::NONE);
        assert_eq!(
            capabilities(Some(&Actor::member(Uuid::new_v4()))),
            Capabilities::NONE
        );
    }

    #[test]
    fn test_unknown_role_uses_bag() {
        let bag = PermissionBag {
            can_edit: true,
            ..PermissionBag::default()
        };
        let caps = capabilities(Some(&actor(ReviewerRole::Unknown, bag)));
        assert!(caps.edit);
        assert!(!caps.approve);
    }

    #[test]
    fn test_custom_role_table() {
        let policies = RolePolicies::new().grant(ReviewerRole::Faculty, Capability::Approve);
        let caps = resolve(
            &policies,
            Some(&actor(ReviewerRole::Faculty, PermissionBag::default())),
        );
        assert!(caps.approve);
        assert!(!caps.reject);
    }

    #[test]
    fn test_requirements() {
        let caps = Capabilities {
            edit: true,
            ..Capabilities::NONE
        };
        assert!(caps.satisfies(Requirement::Either(Capability::Approve, Capability::Edit)));
        assert!(!caps.satisfies(Requirement::Both(Capability::Approve, Capability::Edit)));
        assert!(!caps.satisfies(Requirement::Has(Capability::Approve)));
    }
}
