use std::num::NonZeroU32;

use clap::{Args, Subcommand};
use serde_json::{Value, json};
use trolley_app::{
    context::AppContext,
    domain::{catalog::records::ProductUuid, users::records::UserUuid},
};

use super::CommandError;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print the user's cart
    Show(UserArgs),

    /// Add a product to the user's cart
    Add(AddArgs),

    /// Change the quantity of a product in the cart; 0 removes it
    Update(UpdateArgs),

    /// Remove a product from the cart
    Remove(ItemArgs),
}

#[derive(Debug, Args)]
struct UserArgs {
    /// Cart owner
    #[arg(long)]
    user: UserUuid,
}

#[derive(Debug, Args)]
struct ItemArgs {
    /// Cart owner
    #[arg(long)]
    user: UserUuid,

    /// Catalog product
    #[arg(long)]
    product: ProductUuid,
}

#[derive(Debug, Args)]
struct AddArgs {
    #[command(flatten)]
    item: ItemArgs,

    /// Units to add
    #[arg(long, default_value = "1")]
    quantity: NonZeroU32,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    #[command(flatten)]
    item: ItemArgs,

    /// New quantity
    #[arg(long)]
    quantity: u32,
}

pub(crate) async fn run(app: &AppContext, command: CartCommand) -> Result<Value, CommandError> {
    match command.command {
        CartSubcommand::Show(UserArgs { user }) => {
            Ok(serde_json::to_value(app.carts.get_cart(user).await?)?)
        }
        CartSubcommand::Add(AddArgs {
            item: ItemArgs { user, product },
            quantity,
        }) => Ok(serde_json::to_value(
            app.carts.add_product(user, product, quantity).await?,
        )?),
        CartSubcommand::Update(UpdateArgs {
            item: ItemArgs { user, product },
            quantity,
        }) => Ok(serde_json::to_value(
            app.carts.update_product(user, product, quantity).await?,
        )?),
        CartSubcommand::Remove(ItemArgs { user, product }) => {
            app.carts.delete_product(user, product).await?;

            Ok(json!({ "removed": product }))
        }
    }
}
