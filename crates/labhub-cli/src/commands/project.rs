//! Project submission and query commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use labhub_core::error::AppError;
use labhub_core::types::pagination::PageRequest;
use labhub_entity::project::{Project, ProjectDraft, ProjectFilter, ProjectStatus};
use labhub_service::RequestContext;

use super::App;
use crate::output::{self, OutputFormat};

/// Arguments for project commands
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Project subcommand
    #[command(subcommand)]
    pub command: ProjectCommand,
}

/// Project subcommands
#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Submit a proposal from a JSON file
    Submit {
        /// Path to the submission JSON
        file: PathBuf,
    },
    /// List projects, newest first
    List {
        /// Only this status
        #[arg(short, long)]
        status: Option<ProjectStatus>,
        /// Only this submitter email
        #[arg(short, long)]
        email: Option<String>,
        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,
        /// Page size
        #[arg(long, default_value = "20")]
        page_size: u64,
    },
    /// Show one project
    Show {
        /// Project ID
        id: Uuid,
    },
    /// Delete a project
    Delete {
        /// Project ID
        id: Uuid,
    },
}

/// Project display row
#[derive(Debug, Serialize, Tabled)]
struct ProjectRow {
    id: String,
    title: String,
    student: String,
    category: String,
    status: String,
    submitted: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: output::short_id(p.id),
            title: p.project_title.clone(),
            student: p.student_email.clone(),
            category: p.category.to_string(),
            status: p.status.label().to_string(),
            submitted: p.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute project commands
pub async fn execute(
    args: &ProjectArgs,
    app: &App,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let projects = &app.services.projects;

    match &args.command {
        ProjectCommand::Submit { file } => {
            let raw = tokio::fs::read_to_string(file).await?;
            let draft: ProjectDraft = serde_json::from_str(&raw)?;
            let project = projects.submit(ctx, &draft).await?;
            output::print_success(&format!("Submitted project {}", project.id));
            output::print_item(&project, format);
        }
        ProjectCommand::List {
            status,
            email,
            page,
            page_size,
        } => {
            let filter = ProjectFilter {
                status: *status,
                submitter_email: email.clone(),
            };
            let response = projects
                .list(&filter, &PageRequest::new(*page, *page_size))
                .await?;
            let rows: Vec<ProjectRow> = response.items.iter().map(ProjectRow::from).collect();
            output::print_list(&rows, &response.items, format);
            output::print_page_footer(
                response.page,
                response.total_pages,
                response.total_items,
                format,
            );
        }
        ProjectCommand::Show { id } => {
            let project = projects.get(*id).await?;
            output::print_item(&project, format);
        }
        ProjectCommand::Delete { id } => {
            projects.delete(ctx, *id).await?;
            output::print_success(&format!("Deleted project {id}"));
        }
    }

    Ok(())
}
