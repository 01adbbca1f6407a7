//! Binary crate for the `weather-report` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments layered over environment configuration
//! - Logging setup
//! - Mapping the run outcome to a process exit code

use std::process::ExitCode;

use clap::Parser;

mod cli;

/// Tracing filter used when `RUST_LOG` is unset; stdout carries the report.
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // A missing .env is the common case.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
