//! CLI command definitions and dispatch.

pub mod audit;
pub mod migrate;
pub mod notification;
pub mod project;
pub mod review;
pub mod whoami;
pub mod workflow;

use clap::{Parser, Subcommand};
use tracing::debug;
use uuid::Uuid;

use labhub_core::config::AppConfig;
use labhub_core::error::AppError;
use labhub_database::{DatabasePool, ReviewerStore, Stores};
use labhub_service::notification::mail_sender_from_config;
use labhub_service::{RequestContext, Services};

use crate::output::OutputFormat;

/// LabHub: lab-resource project submissions and reviews
#[derive(Debug, Parser)]
#[command(name = "labhub", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (extension optional)
    #[arg(short, long, default_value = "config/default", env = "LABHUB_CONFIG")]
    pub config: String,

    /// Environment overlay loaded from `config/{env}`
    #[arg(long, default_value = "development", env = "LABHUB_ENV")]
    pub env: String,

    /// User ID to act as; looked up in the reviewer directory
    #[arg(long, env = "LABHUB_ACTOR", global = true)]
    pub actor: Option<Uuid>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Submit, list, show and delete projects
    Project(project::ProjectArgs),
    /// Change a project's review status
    Review(review::ReviewArgs),
    /// Audit trail
    Audit(audit::AuditArgs),
    /// The acting user's notification inbox
    Notifications(notification::NotificationArgs),
    /// Print the status transition table
    Workflow,
    /// Show the acting user's resolved capabilities
    Whoami,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Workflow => workflow::execute(self.format),
            command => {
                let app = App::connect(&config).await?;
                let ctx = app.context(self.actor).await?;
                match command {
                    Commands::Project(args) => project::execute(args, &app, &ctx, self.format).await,
                    Commands::Review(args) => review::execute(args, &app, &ctx, self.format).await,
                    Commands::Audit(args) => audit::execute(args, &app, self.format).await,
                    Commands::Notifications(args) => {
                        notification::execute(args, &app, &ctx, self.format).await
                    }
                    Commands::Whoami => whoami::execute(&ctx, self.format),
                    Commands::Migrate(_) | Commands::Workflow => Ok(()),
                }
            }
        }
    }
}

/// Connected stores and the services wired over them.
pub struct App {
    /// Raw store handles.
    pub stores: Stores,
    /// Services.
    pub services: Services,
}

impl App {
    /// Open the database and wire the services.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let pool = DatabasePool::connect(&config.database).await?;
        let stores = Stores::postgres(pool.pool().clone());
        let mailer = mail_sender_from_config(&config.mail)?;
        let services = Services::new(&stores, config, mailer);
        Ok(Self { stores, services })
    }

    /// Resolve the acting user into a request context.
    ///
    /// Users missing from the reviewer directory act as plain members.
    pub async fn context(&self, actor: Option<Uuid>) -> Result<RequestContext, AppError> {
        let Some(id) = actor else {
            return Err(AppError::validation(
                "No acting user; pass --actor or set LABHUB_ACTOR",
            ));
        };
        match self.stores.reviewers.find_by_id(id).await? {
            Some(reviewer) => {
                debug!(actor_id = %id, role = %reviewer.role, "Acting as reviewer");
                Ok(RequestContext::new(reviewer.to_actor()))
            }
            None => Ok(RequestContext::member(id)),
        }
    }
}
