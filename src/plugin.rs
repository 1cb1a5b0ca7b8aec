//! Lifecycle integration: the export flows bound to host events.
//!
//! The host calls [`ExportPlugin::handle`] once per lifecycle event and awaits
//! it. Each event runs exactly one flow (collect, filter, write). A flow that
//! fails is logged and reported as [`FlowOutcome::Failed`]; it never aborts
//! the host or the other flow.

use crate::collect::{collect_environment, collect_stack_outputs};
use crate::config::{FlowConfig, FlowKind};
use crate::error::{ExportError, Result};
use crate::export::ExportMap;
use crate::host::{ServiceDescription, StackProvider, StackQuery};
use crate::writer::write_exports;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

/// Host lifecycle points the plugin registers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Packaging finished: export provider environment variables.
    AfterPackage,
    /// Deployment finished: export deployed stack outputs.
    AfterDeploy,
}

impl LifecycleEvent {
    /// Hook name as registered with the host.
    pub fn hook_name(&self) -> &'static str {
        match self {
            LifecycleEvent::AfterPackage => "after:package:finalize",
            LifecycleEvent::AfterDeploy => "after:deploy:deploy",
        }
    }

    pub fn flow(&self) -> FlowKind {
        match self {
            LifecycleEvent::AfterPackage => FlowKind::Environment,
            LifecycleEvent::AfterDeploy => FlowKind::Stack,
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hook_name())
    }
}

/// Result of running one flow.
#[derive(Debug)]
pub enum FlowOutcome {
    /// The export file was written.
    Written { path: PathBuf, count: usize },
    /// The flow has no entry under `exports`.
    Skipped,
    /// The flow stopped on a fatal error; its file was not written.
    Failed(ExportError),
}

impl FlowOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FlowOutcome::Failed(_))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            FlowOutcome::Failed(err) => err.exit_code(),
            _ => crate::exit_codes::SUCCESS,
        }
    }
}

/// Export plugin instance for one deployment run.
pub struct ExportPlugin {
    service: ServiceDescription,
    stack_name: String,
    region: String,
    provider: Option<Box<dyn StackProvider>>,
}

impl ExportPlugin {
    /// Create a plugin for `service`; the stack name and region are derived from it.
    pub fn new(service: ServiceDescription) -> Self {
        let stack_name = service.stack_name();
        let region = service.region().to_string();
        Self {
            service,
            stack_name,
            region,
            provider: None,
        }
    }

    /// Attach the provider client used by the stack flow.
    pub fn with_provider(mut self, provider: impl StackProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Query a stack other than `<service>-<stage>`.
    pub fn with_stack_name(mut self, stack_name: impl Into<String>) -> Self {
        self.stack_name = stack_name.into();
        self
    }

    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }

    /// Region the stack flow queries.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Events this plugin handles, in lifecycle order.
    pub fn hooks(&self) -> [LifecycleEvent; 2] {
        [LifecycleEvent::AfterPackage, LifecycleEvent::AfterDeploy]
    }

    /// Run the flow bound to `event` to completion.
    pub async fn handle(&self, event: LifecycleEvent) -> FlowOutcome {
        let kind = event.flow();

        let Some(flow) = self.service.exports().flow(kind) else {
            info!(flow = %kind, "exports.{} is not configured, skipping", kind);
            return FlowOutcome::Skipped;
        };

        match self.run_flow(kind, flow).await {
            Ok((path, count)) => FlowOutcome::Written { path, count },
            Err(err) => {
                error!(flow = %kind, hook = %event, "failed to export {}: {}", kind, err);
                FlowOutcome::Failed(err)
            }
        }
    }

    /// Handle every registered event in order, collecting the outcomes.
    pub async fn run_all(&self) -> Vec<(LifecycleEvent, FlowOutcome)> {
        let mut outcomes = Vec::new();
        for event in self.hooks() {
            outcomes.push((event, self.handle(event).await));
        }
        outcomes
    }

    async fn run_flow(&self, kind: FlowKind, flow: &FlowConfig) -> Result<(PathBuf, usize)> {
        // Reject a bad format before the provider round trip
        flow.export_format()?;
        let include = flow.include_policy()?;

        let mut map = self.collect(kind).await?;
        if let Some(policy) = include {
            policy.apply(&mut map);
        }

        let path = write_exports(&map, flow)?;
        Ok((path, map.len()))
    }

    async fn collect(&self, kind: FlowKind) -> Result<ExportMap> {
        match kind {
            FlowKind::Environment => Ok(collect_environment(&self.service)),
            FlowKind::Stack => {
                let provider = self.provider.as_deref().ok_or_else(|| {
                    ExportError::Provider("no stack provider is available".to_string())
                })?;
                let query = StackQuery {
                    stack_name: &self.stack_name,
                    region: &self.region,
                };
                collect_stack_outputs(provider, query).await
            }
        }
    }
}
