//! End-to-end handling of one review action.

pub mod coordinator;

pub use coordinator::{ReviewCoordinator, ReviewRequest};
