//! Entry point for the `stack-exports` CLI.
//!
//! Installs logging, parses arguments, runs the requested lifecycle events
//! and maps failures to exit codes.

use stack_exports::cli::Cli;
use stack_exports::commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    match commands::dispatch(cli).await {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
