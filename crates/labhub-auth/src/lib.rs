//! # labhub-auth
//!
//! Authorization for the LabHub review workflow. Every permission decision
//! goes through [`rbac::capabilities`]; nothing else inspects roles or
//! permission bags.
//!
//! Authentication is out of scope: callers hand in an already resolved
//! [`labhub_entity::reviewer::Actor`].

pub mod rbac;

pub use rbac::{Capabilities, Capability, CapabilityEnforcer, Requirement, RolePolicies, capabilities};
