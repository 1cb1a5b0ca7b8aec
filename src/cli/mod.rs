//! CLI argument parsing for stack-exports.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::host::DEFAULT_SERVICE_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Export provider environment variables and deployed stack outputs to files.
///
/// Each subcommand stands in for one host lifecycle point:
/// - `package` runs the environment export (after packaging)
/// - `deploy` runs the stack-output export (after deployment)
/// - `run` runs both, in that order
#[derive(Parser, Debug)]
#[command(name = "stack-exports")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Service description to read exports and environment from.
    #[arg(short, long, global = true, default_value = DEFAULT_SERVICE_FILE)]
    pub config: PathBuf,

    /// Deployment stage (overrides provider.stage).
    #[arg(long, global = true)]
    pub stage: Option<String>,

    /// Deployment region (overrides provider.region).
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Stack to query instead of `<service>-<stage>`.
    #[arg(long, global = true)]
    pub stack_name: Option<String>,

    /// Log every exported key/value pair.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for stack-exports.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export provider environment variables (after packaging).
    Package,

    /// Export deployed stack outputs (after deployment).
    Deploy(StackArgs),

    /// Run both exports in lifecycle order.
    ///
    /// A failure in the environment export does not prevent the stack export.
    Run(StackArgs),
}

/// Arguments for commands that query the deployed stack.
#[derive(Parser, Debug)]
pub struct StackArgs {
    /// Saved describe-stacks JSON response for the deployed stack.
    #[arg(long)]
    pub stack_response: PathBuf,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
