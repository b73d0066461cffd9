//! Kuber - compose CLI with Kubernetes deployment
//!
//! This is the main CLI entry point for Kuber.

use clap::Parser;
use kuber::cli::{self, Cli};
use kuber::logging::{self, LogConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(LogConfig::from_options(&cli.global));

    tracing::warn!(
        "Note: This is an experimental alternate implementation of the Compose CLI (https://github.com/docker/compose)"
    );

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::error!("Failed to read project: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli::execute(cli, &working_dir).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = e.to_string();
            if !message.is_empty() {
                tracing::error!("{}", message);
            }
            ExitCode::from((e.exit_code() & 0xff) as u8)
        }
    }
}
