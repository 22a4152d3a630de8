//! Audit trail recording and lookup.

pub mod recorder;

pub use recorder::AuditRecorder;
