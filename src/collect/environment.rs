//! Environment collector: provider-level environment variables.

use crate::export::ExportMap;
use crate::host::ServiceDescription;
use serde_yaml::Value;
use tracing::warn;

/// Build an export map from the provider environment declared in `service`.
///
/// No I/O happens here. A service without declared variables yields an empty
/// map. Scalars are rendered as text (`8080`, `true`, null as an empty
/// string); structured values that the host left unresolved are rendered as
/// compact JSON.
pub fn collect_environment(service: &ServiceDescription) -> ExportMap {
    let mut map = ExportMap::new();

    let Some(environment) = service.provider.environment.as_ref() else {
        return map;
    };

    for (key, value) in environment {
        let Some(key) = scalar_text(key).filter(|k| !k.is_empty()) else {
            warn!(key = ?key, "skipping environment variable with a non-scalar name");
            continue;
        };

        let value = scalar_text(value).unwrap_or_else(|| structured_text(&key, value));
        map.insert(key, value);
    }

    map
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn structured_text(key: &str, value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        warn!(key, error = %e, "could not render environment value, exporting empty string");
        String::new()
    })
}
