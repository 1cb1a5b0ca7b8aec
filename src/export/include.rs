//! Inclusion policy: which collected keys end up in an export file.
//!
//! Patterns are globs matched against whole keys (`Api*`, `*Arn`, `STAGE`).
//! A key is exported when it matches at least one pattern; collector order is
//! kept. Patterns that select nothing are logged, not rejected.

use super::ExportMap;
use crate::error::{ExportError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::warn;

/// Compiled `include` patterns for one flow.
#[derive(Debug, Clone)]
pub struct IncludePolicy {
    patterns: Vec<String>,
    set: GlobSet,
}

impl IncludePolicy {
    /// Compile a list of glob patterns.
    ///
    /// Blank patterns are ignored. An invalid glob is a configuration error.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();

        for pattern in patterns {
            let trimmed = pattern.trim();
            if trimmed.is_empty() {
                continue;
            }
            let glob = Glob::new(trimmed).map_err(|e| {
                ExportError::Config(format!("invalid include pattern '{}': {}", trimmed, e))
            })?;
            builder.add(glob);
            kept.push(trimmed.to_string());
        }

        let set = builder
            .build()
            .map_err(|e| ExportError::Config(format!("invalid include patterns: {}", e)))?;

        Ok(Self {
            patterns: kept,
            set,
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn matches(&self, key: &str) -> bool {
        self.set.is_match(key)
    }

    /// Filter `map` down to the included keys.
    pub fn apply(&self, map: &mut ExportMap) {
        let mut hit = vec![false; self.patterns.len()];

        map.retain_keys(|key| {
            let matched = self.set.matches(key);
            for &idx in &matched {
                hit[idx] = true;
            }
            !matched.is_empty()
        });

        for (pattern, _) in self.patterns.iter().zip(&hit).filter(|(_, h)| !**h) {
            warn!(pattern = %pattern, "include pattern matched no exported key");
        }
    }
}
