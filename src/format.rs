//! Serialization of export maps.
//!
//! Formatting is a pure function of the map and the format; the only failure
//! a caller has to expect is an unsupported format name, which is rejected by
//! [`ExportFormat::parse`] before any file is touched.
//!
//! The `env` format writes keys and values verbatim. Values containing `=`
//! are still readable (split on the first `=`), but embedded newlines are not
//! escaped and will break the line structure.

use crate::error::{ExportError, Result};
use crate::export::ExportMap;
use std::fmt;

/// The closed set of supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `KEY=VALUE` lines.
    Env,
    /// A single JSON object.
    Json,
    /// A YAML block mapping (`yaml` or `yml`).
    Yaml,
    /// A top-level TOML table.
    Toml,
}

impl ExportFormat {
    /// Parse a format name, ignoring ASCII case.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "env" => Ok(Self::Env),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            _ => Err(ExportError::UnsupportedFormat(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }

    /// Serialize `map` in this format.
    pub fn render(&self, map: &ExportMap) -> Result<String> {
        match self {
            Self::Env => Ok(render_env(map)),
            Self::Json => serde_json::to_string(map).map_err(|e| self.serialize_error(e)),
            Self::Yaml => serde_yaml::to_string(map).map_err(|e| self.serialize_error(e)),
            Self::Toml => toml::to_string(map).map_err(|e| self.serialize_error(e)),
        }
    }

    fn serialize_error(&self, err: impl fmt::Display) -> ExportError {
        ExportError::Serialize {
            format: self.as_str(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialize `map` using a format name as written in the config.
pub fn format_exports(map: &ExportMap, format: &str) -> Result<String> {
    ExportFormat::parse(format)?.render(map)
}

/// One `KEY=VALUE` line per entry, in insertion order, no trailing newline.
fn render_env(map: &ExportMap) -> String {
    map.iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
