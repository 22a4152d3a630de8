//! Role-based capability resolution and enforcement.

pub mod capabilities;
pub mod enforcer;
pub mod policies;

pub use capabilities::{Capabilities, Requirement, capabilities};
pub use enforcer::CapabilityEnforcer;
pub use policies::{Capability, RolePolicies};
