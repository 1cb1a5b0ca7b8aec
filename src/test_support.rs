use crate::error::{ExportError, Result};
use crate::host::{
    DescribeStacksResponse, ServiceDescription, StackProvider, StackQuery, StackRecord,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// (stack name, region) pairs a provider double was asked about.
pub(crate) type QueryLog = Arc<Mutex<Vec<(String, String)>>>;

/// Provider double answering every query with a fixed response or error.
///
/// Queries are recorded in a shared log that stays readable after the
/// provider has been handed to a plugin.
pub(crate) struct StaticProvider {
    response: std::result::Result<DescribeStacksResponse, String>,
    log: QueryLog,
}

impl StaticProvider {
    pub(crate) fn new(response: DescribeStacksResponse) -> Self {
        Self {
            response: Ok(response),
            log: QueryLog::default(),
        }
    }

    pub(crate) fn with_stacks(stacks: Vec<StackRecord>) -> Self {
        Self::new(DescribeStacksResponse { stacks })
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            log: QueryLog::default(),
        }
    }

    pub(crate) fn query_log(&self) -> QueryLog {
        Arc::clone(&self.log)
    }

    pub(crate) fn queries(&self) -> Vec<(String, String)> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl StackProvider for StaticProvider {
    async fn describe_stack(&self, query: StackQuery<'_>) -> Result<DescribeStacksResponse> {
        self.log
            .lock()
            .unwrap()
            .push((query.stack_name.to_string(), query.region.to_string()));
        self.response.clone().map_err(ExportError::Provider)
    }
}

/// Service description for `acme-service` (stage dev) with the given
/// provider environment entries and `custom.exports` body, both already
/// indented to four spaces after their first line.
pub(crate) fn service_with_exports(environment: &str, exports: &str) -> ServiceDescription {
    let yaml = format!(
        "service: acme-service\nprovider:\n  name: aws\n  environment:\n    {}\ncustom:\n  exports:\n    {}\n",
        environment, exports
    );
    ServiceDescription::from_yaml(&yaml).unwrap()
}
