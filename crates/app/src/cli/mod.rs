use clap::{Parser, Subcommand};
use serde_json::Value;
use trolley_app::{context::AppContext, database};

use crate::config::AppConfig;

mod cart;
mod checkout;
mod db;
mod errors;
mod product;
mod user;

pub(crate) use errors::CommandError;

#[derive(Debug, Parser)]
#[command(name = "trolley-app", about = "Trolley cart and checkout CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),

    #[command(flatten)]
    App(AppCommand),
}

/// Commands served by the domain services.
#[derive(Debug, Subcommand)]
pub(crate) enum AppCommand {
    Cart(cart::CartCommand),
    Checkout(checkout::CheckoutArgs),
    User(user::UserCommand),
    Product(product::ProductCommand),
}

impl Cli {
    /// Load `.env` if present, then parse flags and environment.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<Value, CommandError> {
        let database_url = self
            .config
            .database
            .database_url
            .ok_or(CommandError::MissingDatabaseUrl)?;

        match self.command {
            Commands::Db(command) => {
                let pool = database::connect(&database_url)
                    .await
                    .map_err(CommandError::Connect)?;

                db::run(command, &pool).await
            }
            Commands::App(command) => {
                let commerce = &self.config.commerce;

                let app = AppContext::from_database_url(
                    &database_url,
                    commerce.carts(),
                    commerce.checkout(),
                )
                .await?;

                execute(&app, command).await
            }
        }
    }
}

pub(crate) async fn execute(app: &AppContext, command: AppCommand) -> Result<Value, CommandError> {
    match command {
        AppCommand::Cart(command) => cart::run(app, command).await,
        AppCommand::Checkout(args) => checkout::run(app, args).await,
        AppCommand::User(command) => user::run(app, command).await,
        AppCommand::Product(command) => product::run(app, command).await,
    }
}
