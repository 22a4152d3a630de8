//! PostgreSQL implementations of the store traits.

pub mod audit;
pub mod notification;
pub mod project;
pub mod reviewer;

pub use audit::AuditLogRepository;
pub use notification::NotificationRepository;
pub use project::ProjectRepository;
pub use reviewer::ReviewerRepository;
