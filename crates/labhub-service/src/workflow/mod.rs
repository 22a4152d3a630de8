//! The project status state machine.

pub mod engine;
pub mod table;

pub use engine::WorkflowEngine;
pub use table::{TransitionRule, TransitionTable};
