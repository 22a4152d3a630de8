//! Request context carrying the resolved actor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labhub_entity::reviewer::Actor;

/// Context for one caller request.
///
/// The actor comes from the external identity provider; services never
/// authenticate anything themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Who is acting.
    pub actor: Actor,
    /// When the request was received. Used as "now" for every timestamp
    /// the request writes.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            request_time: Utc::now(),
        }
    }

    /// Context for a plain user without reviewer role or permissions.
    pub fn member(user_id: Uuid) -> Self {
        Self::new(Actor::member(user_id))
    }

    /// The acting user's ID.
    pub fn user_id(&self) -> Uuid {
        self.actor.id
    }
}
