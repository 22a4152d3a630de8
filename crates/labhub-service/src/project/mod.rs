//! Project submission and query surface.

pub mod service;

pub use service::ProjectService;
