//! Service description supplied by the deployment host.
//!
//! Only the parts the export flows read are modelled: the service name, the
//! provider stage/region/environment and `custom.exports`. Everything else in
//! the document is ignored.

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use serde::Deserialize;
use std::path::Path;

/// Default service description file read by the CLI host.
pub const DEFAULT_SERVICE_FILE: &str = "serverless.yml";

/// Stage used when none is declared or the declared one is an unresolved variable.
pub const DEFAULT_STAGE: &str = "dev";

/// Region used when none is declared.
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceDescription {
    /// Logical service name.
    #[serde(default)]
    pub service: String,

    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub custom: CustomSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub stage: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    /// Provider-level environment variables, in declaration order.
    #[serde(default)]
    pub environment: Option<serde_yaml::Mapping>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomSection {
    #[serde(default)]
    pub exports: ExportConfig,
}

impl ServiceDescription {
    /// Load a service description from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!(
                "failed to read service file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a service description from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let service: ServiceDescription = serde_yaml::from_str(yaml).map_err(|e| {
            ExportError::Config(format!("failed to parse service description: {}", e))
        })?;

        service.custom.exports.validate()?;
        Ok(service)
    }

    pub fn exports(&self) -> &ExportConfig {
        &self.custom.exports
    }

    /// Resolved deployment stage.
    ///
    /// A stage that is still an unresolved `${...}` variable falls back to `dev`.
    pub fn stage(&self) -> &str {
        match self.provider.stage.as_deref() {
            Some(stage) if !stage.is_empty() && !stage.starts_with('$') => stage,
            _ => DEFAULT_STAGE,
        }
    }

    pub fn region(&self) -> &str {
        match self.provider.region.as_deref() {
            Some(region) if !region.is_empty() => region,
            _ => DEFAULT_REGION,
        }
    }

    /// Name of the deployed stack: `<service>-<stage>`.
    pub fn stack_name(&self) -> String {
        format!("{}-{}", self.service, self.stage())
    }

    pub fn set_stage(&mut self, stage: impl Into<String>) {
        self.provider.stage = Some(stage.into());
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.provider.region = Some(region.into());
    }
}
