use clap::{Args, Subcommand};
use serde_json::{Value, json};
use sqlx::PgPool;
use tracing::info;
use trolley_app::database;

use super::CommandError;

#[derive(Debug, Args)]
pub(crate) struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate,
}

pub(crate) async fn run(command: DbCommand, pool: &PgPool) -> Result<Value, CommandError> {
    match command.command {
        DbSubcommand::Migrate => {
            database::migrate(pool).await?;

            info!("migrations applied");

            Ok(json!({ "migrated": true }))
        }
    }
}
