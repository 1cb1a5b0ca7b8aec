//! stack-exports: write provider environment variables and deployed stack
//! outputs to env, JSON, YAML or TOML files after a deployment.
//!
//! The library is what a deployment host embeds: it supplies a
//! [`host::ServiceDescription`] and a [`host::StackProvider`], then awaits
//! [`plugin::ExportPlugin::handle`] at the end of packaging and deployment.

pub mod cli;
mod collect;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod export;
pub mod format;
pub mod fs;
pub mod host;
pub mod plugin;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use collect::{collect_environment, collect_stack_outputs};
pub use config::{ExportConfig, FlowConfig, FlowKind};
pub use error::{ExportError, Result};
pub use export::{ExportMap, IncludePolicy};
pub use format::{ExportFormat, format_exports};
pub use plugin::{ExportPlugin, FlowOutcome, LifecycleEvent};
pub use writer::write_exports;
