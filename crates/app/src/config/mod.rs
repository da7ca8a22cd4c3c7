//! Process configuration

use clap::Args;

use crate::config::{commerce::CommerceConfig, db::DatabaseConfig, logging::LoggingConfig};

pub(crate) mod commerce;
pub(crate) mod db;
pub(crate) mod logging;

/// Settings shared by every command, read from flags, the environment or `.env`.
#[derive(Debug, Args)]
pub(crate) struct AppConfig {
    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Cart and checkout defaults.
    #[command(flatten)]
    pub commerce: CommerceConfig,
}
