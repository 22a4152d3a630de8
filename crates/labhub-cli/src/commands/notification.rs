//! Notification inbox commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use labhub_core::error::AppError;
use labhub_core::types::pagination::PageRequest;
use labhub_entity::notification::model::Notification;
use labhub_service::RequestContext;

use super::App;
use crate::output::{self, OutputFormat};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// List notifications, newest first
    List {
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
    },
    /// Count unread notifications
    Unread,
    /// Mark one notification read
    Read {
        /// Notification ID
        id: Uuid,
    },
    /// Mark every notification read
    ReadAll,
    /// Delete one notification
    Delete {
        /// Notification ID
        id: Uuid,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    id: String,
    time: String,
    title: String,
    message: String,
    read: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: output::short_id(n.id),
            time: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
            title: n.title.clone(),
            message: n.message.clone(),
            read: if n.is_read { "yes" } else { "no" }.to_string(),
        }
    }
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationArgs,
    app: &App,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let inbox = &app.services.inbox;

    match &args.command {
        NotificationCommand::List { page } => {
            let response = inbox.list(ctx, &PageRequest::new(*page, 20)).await?;
            let rows: Vec<NotificationRow> =
                response.items.iter().map(NotificationRow::from).collect();
            output::print_list(&rows, &response.items, format);
            output::print_page_footer(
                response.page,
                response.total_pages,
                response.total_items,
                format,
            );
        }
        NotificationCommand::Unread => {
            let count = inbox.unread_count(ctx).await?;
            println!("{count}");
        }
        NotificationCommand::Read { id } => {
            inbox.mark_read(ctx, *id).await?;
            output::print_success("Marked as read.");
        }
        NotificationCommand::ReadAll => {
            let changed = inbox.mark_all_read(ctx).await?;
            output::print_success(&format!("Marked {changed} notification(s) as read."));
        }
        NotificationCommand::Delete { id } => {
            inbox.delete(ctx, *id).await?;
            output::print_success("Notification deleted.");
        }
    }
    Ok(())
}
