//! Configuration types and defaults for export flows.
//!
//! Default values are named constants so that the resolver and the serde
//! defaults share a single source.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Destination file used when a flow does not name one.
pub const DEFAULT_FILE: &str = ".env";

/// Serialization format used when a flow does not name one.
pub const DEFAULT_FORMAT: &str = "env";

/// The two independent export flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Provider-level environment variables, exported after packaging.
    Environment,
    /// Deployed stack outputs, exported after deployment.
    Stack,
}

impl FlowKind {
    /// Key of this flow under `exports` in the service description.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Environment => "environment",
            FlowKind::Stack => "stack",
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Default value functions for serde
pub(crate) fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_FILE)
}
pub(crate) fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
