//! Transition notifications, email delivery and the user inbox.

pub mod dispatcher;
pub mod inbox;
pub mod mail;

pub use dispatcher::NotificationDispatcher;
pub use inbox::InboxService;
pub use mail::{HttpMailSender, LogMailSender, MailMessage, MailSender, mail_sender_from_config};
