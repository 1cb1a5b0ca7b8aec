//! Cloud provider query boundary.
//!
//! The export flows need a single provider operation: describe a stack by
//! name in a region. The response types mirror the provider's describe-stacks document
//! with every per-output field optional, so malformed entries are handled by
//! pattern matching in the collector instead of failing deserialization.

use crate::error::{ExportError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Response of a describe-stack request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeStacksResponse {
    #[serde(default)]
    pub stacks: Vec<StackRecord>,
}

/// One stack record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackRecord {
    #[serde(default)]
    pub stack_name: Option<String>,

    #[serde(default)]
    pub outputs: Option<Vec<StackOutput>>,
}

/// One raw stack output. Both key and value may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackOutput {
    #[serde(default)]
    pub output_key: Option<String>,

    #[serde(default)]
    pub output_value: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl StackOutput {
    pub fn new(key: Option<&str>, value: Option<&str>) -> Self {
        Self {
            output_key: key.map(str::to_string),
            output_value: value.map(str::to_string),
            description: None,
        }
    }
}

/// Stack to describe and the region it was deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackQuery<'a> {
    pub stack_name: &'a str,
    pub region: &'a str,
}

/// Client for the provider's stack-description API.
#[async_trait]
pub trait StackProvider: Send + Sync {
    /// Describe the stack named in `query`, within `query.region`.
    ///
    /// A stack that does not exist is reported as a response without a
    /// matching record, not as an error.
    async fn describe_stack(&self, query: StackQuery<'_>) -> Result<DescribeStacksResponse>;
}

/// Provider that answers from a saved describe-stacks JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StackProvider for JsonFileProvider {
    async fn describe_stack(&self, query: StackQuery<'_>) -> Result<DescribeStacksResponse> {
        debug!(
            stack = query.stack_name,
            region = query.region,
            path = %self.path.display(),
            "reading stack description"
        );

        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ExportError::Provider(format!(
                "failed to read stack response '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ExportError::Provider(format!(
                "failed to parse stack response '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}
