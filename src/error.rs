//! Error types for stack-exports.
//!
//! Uses thiserror for derive macros. Every variant is fatal for the flow that
//! raised it; a flow that is simply not configured is reported as
//! [`FlowOutcome::Skipped`](crate::plugin::FlowOutcome) instead.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for export flows.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The service description could not be read or parsed.
    #[error("{0}")]
    Config(String),

    /// The provider returned no record for the requested stack.
    #[error("stack '{stack_name}' not found")]
    StackNotFound { stack_name: String },

    /// The provider query could not be performed.
    #[error("provider request failed: {0}")]
    Provider(String),

    /// The configured format is not one of env, json, yaml, yml or toml.
    #[error("format '{0}' is not supported (expected one of: env, json, yaml, yml, toml)")]
    UnsupportedFormat(String),

    /// Serializing the export map failed.
    #[error("failed to serialize exports as {format}: {message}")]
    Serialize { format: &'static str, message: String },

    /// The destination exists and the flow does not allow overwriting it.
    #[error("file '{}' already exists (set overwrite: true to replace it)", .0.display())]
    FileExists(PathBuf),

    /// The export file could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Returns the exit code the CLI host uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::Config(_) => exit_codes::USER_ERROR,
            ExportError::UnsupportedFormat(_) => exit_codes::USER_ERROR,
            ExportError::Serialize { .. } => exit_codes::USER_ERROR,
            ExportError::FileExists(_) => exit_codes::FILE_CONFLICT,
            ExportError::Io { .. } => exit_codes::IO_FAILURE,
            ExportError::StackNotFound { .. } => exit_codes::PROVIDER_FAILURE,
            ExportError::Provider(_) => exit_codes::PROVIDER_FAILURE,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
