use clap::Args;
use serde_json::Value;
use trolley_app::{context::AppContext, domain::users::records::UserUuid};

use super::CommandError;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Cart owner paying for the cart
    #[arg(long)]
    user: UserUuid,
}

pub(crate) async fn run(app: &AppContext, args: CheckoutArgs) -> Result<Value, CommandError> {
    let receipt = app.checkout.checkout(args.user).await?;

    Ok(serde_json::to_value(receipt)?)
}
