//! Capability enforcement: turns a failed check into an authorization error.

use tracing::debug;

use labhub_core::error::AppError;
use labhub_entity::reviewer::Actor;

use super::capabilities::{Capabilities, Requirement, resolve};
use super::policies::RolePolicies;

/// Enforces capability requirements for workflow actions.
#[derive(Debug, Clone, Default)]
pub struct CapabilityEnforcer {
    /// The role grant table.
    policies: RolePolicies,
}

impl CapabilityEnforcer {
    /// Creates a new enforcer with the default role table.
    pub fn new() -> Self {
        Self {
            policies: RolePolicies::new(),
        }
    }

    /// Creates an enforcer with a custom role table.
    pub fn with_policies(policies: RolePolicies) -> Self {
        Self { policies }
    }

    /// Resolve the capabilities of an actor.
    pub fn capabilities(&self, actor: Option<&Actor>) -> Capabilities {
        resolve(&self.policies, actor)
    }

    /// Fails unless the actor is present and not `view_only`.
    ///
    /// Runs ahead of every other check on a mutating action.
    pub fn require_mutating_role(&self, actor: Option<&Actor>) -> Result<(), AppError> {
        match actor {
            Some(a) if !a.role.is_some_and(|r| r.is_view_only()) => Ok(()),
            _ => {
                debug!(actor_id = ?actor.map(|a| a.id), "Mutating action refused for view-only or anonymous actor");
                Err(AppError::authorization())
            }
        }
    }

    /// Checks the actor against a requirement.
    ///
    /// The error never says which capability was missing.
    pub fn require(&self, actor: Option<&Actor>, requirement: Requirement) -> Result<(), AppError> {
        self.require_mutating_role(actor)?;
        if self.capabilities(actor).satisfies(requirement) {
            Ok(())
        } else {
            debug!(
                actor_id = ?actor.map(|a| a.id),
                requirement = ?requirement,
                "Capability requirement not met"
            );
            Err(AppError::authorization())
        }
    }

    /// Returns a reference to the underlying role table.
    pub fn policies(&self) -> &RolePolicies {
        &self.policies
    }
}
