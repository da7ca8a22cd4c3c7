//! Trolley cart and checkout CLI

use std::process::ExitCode;

use tracing::error;

use crate::cli::Cli;

mod cli;
mod config;
mod observability;

#[tokio::main]
pub async fn main() -> ExitCode {
    let cli = match Cli::load() {
        Ok(cli) => cli,
        Err(parse_error) => parse_error.exit(),
    };

    if let Err(init_error) = observability::init_subscriber(&cli.config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging is not initialized, so the failure can only go to stderr"
        )]
        {
            eprintln!("failed to initialize logging: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(output) => {
            #[expect(clippy::print_stdout, reason = "command output is the CLI's product")]
            {
                println!("{output:#}");
            }

            ExitCode::SUCCESS
        }
        Err(command_error) => {
            error!(kind = ?command_error.kind(), "{command_error}");

            #[expect(
                clippy::print_stderr,
                reason = "errors are reported to the caller as JSON on stderr"
            )]
            {
                eprintln!("{:#}", command_error.to_json());
            }

            ExitCode::FAILURE
        }
    }
}
