//! Metric name allow-list

use std::collections::HashSet;

use crate::core::constants::DEFAULT_METRICS;

/// Set of metric family names forwarded to the intake.
///
/// Built once at startup and shared read-only across cycles.
#[derive(Debug, Clone)]
pub struct MetricFilter {
    names: HashSet<String>,
    defaulted: bool,
}

impl MetricFilter {
    /// Build from a configured list, substituting [`DEFAULT_METRICS`] when the
    /// list holds no non-blank entry.
    pub fn from_config(names: &[String]) -> Self {
        let configured: HashSet<String> = names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();

        if configured.is_empty() {
            tracing::debug!(
                count = DEFAULT_METRICS.len(),
                "No metrics configured, using default list"
            );
            return Self {
                names: DEFAULT_METRICS.iter().map(|n| n.to_string()).collect(),
                defaulted: true,
            };
        }

        Self {
            names: configured,
            defaulted: false,
        }
    }

    pub fn should_retain(&self, family_name: &str) -> bool {
        self.names.contains(family_name)
    }

    /// Whether the built-in default list is in use
    pub fn is_default(&self) -> bool {
        self.defaulted
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
