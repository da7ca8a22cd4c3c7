use clap::{Args, Subcommand};
use serde_json::Value;
use trolley_app::{context::AppContext, domain::catalog::records::ProductUuid};

use super::CommandError;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Print a catalog product
    Show {
        #[arg(long)]
        product: ProductUuid,
    },
}

pub(crate) async fn run(app: &AppContext, command: ProductCommand) -> Result<Value, CommandError> {
    match command.command {
        ProductSubcommand::Show { product } => {
            let product = app
                .catalog
                .find_product(product)
                .await?
                .ok_or(CommandError::ProductNotFound)?;

            Ok(serde_json::to_value(product)?)
        }
    }
}
