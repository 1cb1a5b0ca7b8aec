//! ExportConfig and FlowConfig definitions.

use super::types::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Export settings read from `custom.exports` in the service description.
///
/// Each flow is optional. A flow without an entry is "not configured" and is
/// skipped rather than treated as an error. A flow key with an empty value
/// (`stack:` or `stack: ~`) is configured with every setting at its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Settings for the provider environment variable export.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_flow"
    )]
    pub environment: Option<FlowConfig>,

    /// Settings for the deployed stack output export.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_flow"
    )]
    pub stack: Option<FlowConfig>,
}

/// Per-flow destination, format and overwrite policy.
///
/// Flows never share settings, even when they target the same file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Destination path (default: `.env`).
    #[serde(default = "default_file")]
    pub file: PathBuf,

    /// Format name, matched case-insensitively when the flow runs (default: `env`).
    #[serde(default = "default_format")]
    pub format: String,

    /// Whether an existing destination may be replaced (default: false).
    #[serde(default)]
    pub overwrite: bool,

    /// Glob patterns selecting which keys to export. All keys when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            file: default_file(),
            format: default_format(),
            overwrite: false,
            include: None,
        }
    }
}

/// Deserialize a flow entry that is present in the document.
///
/// Only reached when the key exists, so a null value still enables the flow.
fn present_flow<'de, D>(deserializer: D) -> Result<Option<FlowConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<FlowConfig>::deserialize(deserializer).map(|flow| Some(flow.unwrap_or_default()))
}
