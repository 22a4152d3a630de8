//! Core type definitions used across the LabHub workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
