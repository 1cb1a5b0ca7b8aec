//! Config parsing, flow resolution and validation.

use super::model::{ExportConfig, FlowConfig};
use super::types::FlowKind;
use crate::error::{ExportError, Result};
use crate::export::IncludePolicy;
use crate::format::ExportFormat;

impl ExportConfig {
    /// Parse export settings from a YAML string holding the `exports` mapping.
    ///
    /// Unknown fields are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ExportConfig = serde_yaml::from_str(yaml)
            .map_err(|e| ExportError::Config(format!("failed to parse exports YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve the settings for one flow.
    ///
    /// Returns `None` when the flow has no entry, which callers treat as an
    /// informational skip.
    pub fn flow(&self, kind: FlowKind) -> Option<&FlowConfig> {
        match kind {
            FlowKind::Environment => self.environment.as_ref(),
            FlowKind::Stack => self.stack.as_ref(),
        }
    }

    /// Flows that have an entry, in lifecycle order.
    pub fn configured_flows(&self) -> Vec<FlowKind> {
        [FlowKind::Environment, FlowKind::Stack]
            .into_iter()
            .filter(|kind| self.flow(*kind).is_some())
            .collect()
    }

    /// Validate structural settings of every configured flow.
    ///
    /// Validation rules:
    /// - `file` must be non-empty
    ///
    /// The format name is deliberately not checked here: an unsupported
    /// format fails only the flow that names it.
    pub fn validate(&self) -> Result<()> {
        for kind in self.configured_flows() {
            if let Some(flow) = self.flow(kind)
                && flow.file.as_os_str().is_empty()
            {
                return Err(ExportError::Config(format!(
                    "config validation failed: exports.{}.file must not be empty",
                    kind
                )));
            }
        }
        Ok(())
    }
}

impl FlowConfig {
    /// Parse the configured format name into the closed set of formats.
    pub fn export_format(&self) -> Result<ExportFormat> {
        ExportFormat::parse(&self.format)
    }

    /// Compile the `include` patterns, if any.
    pub fn include_policy(&self) -> Result<Option<IncludePolicy>> {
        self.include
            .as_deref()
            .map(IncludePolicy::new)
            .transpose()
    }
}
