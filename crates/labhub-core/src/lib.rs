//! # labhub-core
//!
//! Core crate for LabHub, the lab project review tracker. Contains
//! configuration schemas, pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other LabHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
