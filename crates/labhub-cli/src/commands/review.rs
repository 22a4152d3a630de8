//! Review command.

use clap::Args;
use uuid::Uuid;

use labhub_core::error::AppError;
use labhub_entity::project::ProjectStatus;
use labhub_service::{RequestContext, ReviewRequest};

use super::App;
use crate::output::{self, OutputFormat};

/// Arguments for the review command
#[derive(Debug, Args)]
pub struct ReviewArgs {
    /// Project ID
    pub project_id: Uuid,
    /// Target status: pending, under_review, approved, rejected, completed
    #[arg(short, long)]
    pub status: ProjectStatus,
    /// Reviewer comments (required for approved and rejected)
    #[arg(short, long)]
    pub comments: Option<String>,
}

/// Execute the review command
pub async fn execute(
    args: &ReviewArgs,
    app: &App,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let updated = app
        .services
        .review
        .review(
            ctx,
            ReviewRequest {
                project_id: args.project_id,
                status: args.status,
                comments: args.comments.clone(),
            },
        )
        .await?;

    output::print_success(&format!(
        "Project {} is now {}",
        output::short_id(updated.id),
        updated.status.label()
    ));
    output::print_item(&updated, format);
    Ok(())
}
