use clap::{Args, Subcommand};
use serde_json::Value;
use trolley_app::{context::AppContext, domain::users::records::UserUuid};

use super::CommandError;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Print a user's wallet balance and address
    Show {
        #[arg(long)]
        user: UserUuid,
    },
}

pub(crate) async fn run(app: &AppContext, command: UserCommand) -> Result<Value, CommandError> {
    match command.command {
        UserSubcommand::Show { user } => Ok(serde_json::to_value(app.users.get_user(user).await?)?),
    }
}
