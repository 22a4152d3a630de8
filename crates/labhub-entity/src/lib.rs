//! # labhub-entity
//!
//! Domain entity models for LabHub. Every struct in this crate represents
//! a database table row or a domain value object. Row types additionally
//! derive `sqlx::FromRow`.

pub mod audit;
pub mod notification;
pub mod project;
pub mod reviewer;
