//! Database migration commands.

use clap::{Args, Subcommand};

use labhub_core::config::AppConfig;
use labhub_core::error::AppError;
use labhub_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    match args.command {
        MigrateCommand::Run => {
            let mut db = config.database.clone();
            db.auto_migrate = false;
            let pool = DatabasePool::connect(&db).await?;
            labhub_database::migration::run_migrations(pool.pool()).await?;
            pool.close().await;
            output::print_success("All migrations applied.");
        }
    }
    Ok(())
}
