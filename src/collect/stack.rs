//! Stack-output collector: one provider round trip, reduced into an ExportMap.

use crate::error::{ExportError, Result};
use crate::export::ExportMap;
use crate::host::{StackOutput, StackProvider, StackQuery, StackRecord};
use tracing::{debug, warn};

/// Query the provider for the stack in `query` and reduce its outputs.
///
/// # Returns
///
/// * `Ok(ExportMap)` - Outputs in provider order (empty if the stack has none)
/// * `Err(ExportError::StackNotFound)` - No record for the stack in the response
/// * `Err(ExportError::Provider)` - The query itself failed
pub async fn collect_stack_outputs(
    provider: &dyn StackProvider,
    query: StackQuery<'_>,
) -> Result<ExportMap> {
    let response = provider.describe_stack(query).await?;

    let stack = select_record(response.stacks, query.stack_name).ok_or_else(|| {
        ExportError::StackNotFound {
            stack_name: query.stack_name.to_string(),
        }
    })?;

    let outputs = stack.outputs.unwrap_or_default();
    debug!(
        stack = query.stack_name,
        region = query.region,
        outputs = outputs.len(),
        "described stack"
    );

    Ok(reduce_outputs(outputs))
}

/// Pick the record named `stack_name`, wherever it sits in the response.
///
/// A record without a name is used only when no record carries the name.
fn select_record(stacks: Vec<StackRecord>, stack_name: &str) -> Option<StackRecord> {
    let mut unnamed = None;

    for record in stacks {
        match record.stack_name.as_deref() {
            Some(name) if name == stack_name => return Some(record),
            None if unnamed.is_none() => unnamed = Some(record),
            _ => {}
        }
    }

    unnamed
}

/// Entries without a key are dropped; a missing value becomes "".
fn reduce_outputs(outputs: Vec<StackOutput>) -> ExportMap {
    let mut map = ExportMap::new();

    for output in outputs {
        match output {
            StackOutput {
                output_key: Some(key),
                output_value,
                ..
            } => {
                map.insert(key, output_value.unwrap_or_default());
            }
            StackOutput {
                output_key: None,
                output_value,
                ..
            } => {
                warn!(value = ?output_value, "skipping stack output without a key");
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DescribeStacksResponse;
    use crate::test_support::StaticProvider;

    fn query(stack_name: &str) -> StackQuery<'_> {
        StackQuery {
            stack_name,
            region: "us-east-1",
        }
    }

    fn record(name: &str, outputs: Vec<StackOutput>) -> StackRecord {
        StackRecord {
            stack_name: Some(name.to_string()),
            outputs: Some(outputs),
        }
    }

    #[tokio::test]
    async fn test_reduces_missing_keys_and_values() {
        let provider = StaticProvider::with_stacks(vec![record(
            "acme-service-dev",
            vec![
                StackOutput::new(Some("Foo"), Some("bar")),
                StackOutput::new(None, Some("x")),
                StackOutput::new(Some("Baz"), None),
            ],
        )]);

        let map = collect_stack_outputs(&provider, query("acme-service-dev"))
            .await
            .unwrap();

        let entries: Vec<(&str, &str)> = map.iter().collect();
        assert_eq!(entries, vec![("Foo", "bar"), ("Baz", "")]);
    }

    #[tokio::test]
    async fn test_preserves_provider_order() {
        let provider = StaticProvider::with_stacks(vec![record(
            "api-dev",
            vec![
                StackOutput::new(Some("Zeta"), Some("1")),
                StackOutput::new(Some("Alpha"), Some("2")),
                StackOutput::new(Some("Mid"), Some("3")),
            ],
        )]);

        let map = collect_stack_outputs(&provider, query("api-dev")).await.unwrap();

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[tokio::test]
    async fn test_zero_stacks_is_stack_not_found() {
        let provider = StaticProvider::new(DescribeStacksResponse::default());

        let err = collect_stack_outputs(&provider, query("api-dev"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::StackNotFound { ref stack_name } if stack_name == "api-dev"));
    }

    #[tokio::test]
    async fn test_other_stack_is_stack_not_found() {
        let provider = StaticProvider::with_stacks(vec![record("api-prod", vec![])]);

        let err = collect_stack_outputs(&provider, query("api-dev"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::StackNotFound { .. }));
    }

    #[tokio::test]
    async fn test_selects_matching_stack_among_many() {
        let provider = StaticProvider::with_stacks(vec![
            record("api-prod", vec![StackOutput::new(Some("Env"), Some("prod"))]),
            record("api-dev", vec![StackOutput::new(Some("Env"), Some("dev"))]),
        ]);

        let map = collect_stack_outputs(&provider, query("api-dev")).await.unwrap();
        assert_eq!(map.get("Env"), Some("dev"));
    }

    #[tokio::test]
    async fn test_named_record_wins_over_unnamed_one() {
        let provider = StaticProvider::with_stacks(vec![
            StackRecord {
                stack_name: None,
                outputs: Some(vec![StackOutput::new(Some("Env"), Some("unnamed"))]),
            },
            record("api-dev", vec![StackOutput::new(Some("Env"), Some("dev"))]),
        ]);

        let map = collect_stack_outputs(&provider, query("api-dev")).await.unwrap();
        assert_eq!(map.get("Env"), Some("dev"));
    }

    #[tokio::test]
    async fn test_unnamed_record_used_when_no_name_matches() {
        let provider = StaticProvider::with_stacks(vec![
            record("api-prod", vec![StackOutput::new(Some("Env"), Some("prod"))]),
            StackRecord {
                stack_name: None,
                outputs: Some(vec![StackOutput::new(Some("Env"), Some("unnamed"))]),
            },
        ]);

        let map = collect_stack_outputs(&provider, query("api-dev")).await.unwrap();
        assert_eq!(map.get("Env"), Some("unnamed"));
    }

    #[tokio::test]
    async fn test_region_reaches_provider() {
        let provider = StaticProvider::with_stacks(vec![record("api-dev", vec![])]);

        collect_stack_outputs(
            &provider,
            StackQuery {
                stack_name: "api-dev",
                region: "eu-central-1",
            },
        )
        .await
        .unwrap();

        assert_eq!(
            provider.queries(),
            vec![("api-dev".to_string(), "eu-central-1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_stack_without_outputs_is_empty_map() {
        let provider = StaticProvider::with_stacks(vec![StackRecord {
            stack_name: Some("api-dev".to_string()),
            outputs: None,
        }]);

        let map = collect_stack_outputs(&provider, query("api-dev")).await.unwrap();
        assert!(map.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let provider = StaticProvider::failing("connection reset");

        let err = collect_stack_outputs(&provider, query("api-dev"))
            .await
            .unwrap_err();

        assert!(matches!(err, ExportError::Provider(_)));
    }
}
