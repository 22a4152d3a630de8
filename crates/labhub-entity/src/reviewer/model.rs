//! Reviewer record and the resolved actor handed to the workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::ReviewerRole;

/// Explicit per-user capability flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionBag {
    /// May approve or reject projects.
    #[serde(default)]
    pub can_approve: bool,
    /// May correct project status freely.
    #[serde(default)]
    pub can_edit: bool,
    /// May delete projects.
    #[serde(default)]
    pub can_delete: bool,
}

/// The actor resolved by the external identity provider.
///
/// The workflow never authenticates; it only consumes this value. Missing
/// role or bag means an unauthenticated or unknown caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user's ID.
    pub id: Uuid,
    /// Role, if the identity provider supplied one.
    pub role: Option<ReviewerRole>,
    /// Explicit permission bag, if supplied.
    pub permissions: Option<PermissionBag>,
}

impl Actor {
    /// Create an actor with a role and permission bag.
    pub fn new(id: Uuid, role: ReviewerRole, permissions: PermissionBag) -> Self {
        Self {
            id,
            role: Some(role),
            permissions: Some(permissions),
        }
    }

    /// An authenticated user with no reviewer role, such as a student.
    pub fn member(id: Uuid) -> Self {
        Self {
            id,
            role: None,
            permissions: None,
        }
    }
}

/// A row of the reviewer directory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reviewer {
    /// User ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: Option<String>,
    /// Role string as stored.
    pub role: String,
    /// Explicit approve flag.
    pub can_approve: bool,
    /// Explicit edit flag.
    pub can_edit: bool,
    /// Explicit delete flag.
    pub can_delete: bool,
    /// When the reviewer was added.
    pub created_at: DateTime<Utc>,
}

impl Reviewer {
    /// Resolve this record into a workflow actor.
    pub fn to_actor(&self) -> Actor {
        let role = self
            .role
            .parse::<ReviewerRole>()
            .unwrap_or(ReviewerRole::Unknown);
        Actor::new(
            self.id,
            role,
            PermissionBag {
                can_approve: self.can_approve,
                can_edit: self.can_edit,
                can_delete: self.can_delete,
            },
        )
    }
}
