//! In-memory stores for single-node runs and tests.
//!
//! State lives in `tokio::sync::RwLock`-guarded maps; nothing survives the
//! process.

pub mod audit;
pub mod notification;
pub mod project;
pub mod reviewer;

pub use audit::MemoryAuditLogStore;
pub use notification::MemoryNotificationStore;
pub use project::MemoryProjectStore;
pub use reviewer::MemoryReviewerStore;
