//! Audit log CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use labhub_core::error::AppError;
use labhub_core::types::pagination::PageRequest;
use labhub_database::store::AuditQuery;
use labhub_entity::audit::model::AuditLogEntry;

use super::App;
use crate::output::{self, OutputFormat};

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// Search the audit trail
    Search {
        /// Exact action tag, e.g. project.approved
        #[arg(short, long)]
        action: Option<String>,
        /// Acting user ID
        #[arg(long)]
        by: Option<Uuid>,
        /// Project ID
        #[arg(short, long)]
        project: Option<Uuid>,
        /// Number of results
        #[arg(short, long, default_value = "50")]
        limit: u64,
    },
}

/// Audit display row
#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    time: String,
    actor: String,
    action: String,
    entity: String,
    details: String,
}

impl From<&AuditLogEntry> for AuditRow {
    fn from(e: &AuditLogEntry) -> Self {
        Self {
            time: e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            actor: e
                .actor_id
                .map(output::short_id)
                .unwrap_or_else(|| "system".to_string()),
            action: e.action.clone(),
            entity: match e.entity_id {
                Some(id) => format!("{}:{}", e.entity_type, output::short_id(id)),
                None => e.entity_type.clone(),
            },
            details: e
                .details
                .as_ref()
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Execute audit commands
pub async fn execute(args: &AuditArgs, app: &App, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        AuditCommand::Search {
            action,
            by,
            project,
            limit,
        } => {
            let mut query = match project {
                Some(id) => AuditQuery::for_project(*id),
                None => AuditQuery::default(),
            };
            query.action = action.clone();
            query.actor_id = *by;

            let response = app
                .services
                .audit
                .search(&query, &PageRequest::new(1, *limit))
                .await?;
            let rows: Vec<AuditRow> = response.items.iter().map(AuditRow::from).collect();
            output::print_list(&rows, &response.items, format);
        }
    }
    Ok(())
}
