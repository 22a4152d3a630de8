//! Reviewer (actor) domain entities.

pub mod model;
pub mod role;

pub use model::{Actor, PermissionBag, Reviewer};
pub use role::ReviewerRole;
