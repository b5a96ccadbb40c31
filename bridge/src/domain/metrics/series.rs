//! Family to outbound batch conversion

use crate::core::config::TimestampPolicy;
use crate::data::types::{Batch, IntakeType, MetricFamily, Resource, Sample, SeriesPoint};
use crate::utils::time::millis_to_epoch_secs;

/// Build the outbound batch for one retained family.
///
/// Samples with neither a gauge nor an untyped value are skipped, as are
/// NaN and infinite values, which the intake cannot represent. The batch may
/// come back empty. `now_secs` is the submission-time clock.
pub fn build_batch(family: &MetricFamily, policy: TimestampPolicy, now_secs: i64) -> Batch {
    let points = family
        .samples
        .iter()
        .filter_map(|sample| {
            let value = sample.value()?;
            if !value.is_finite() {
                tracing::debug!(
                    metric = %family.name,
                    labels = ?sample.labels,
                    value = %value,
                    "Skipping non-finite sample"
                );
                return None;
            }
            Some(build_point(
                &family.name,
                sample,
                value,
                point_timestamp(sample, policy, now_secs),
            ))
        })
        .collect();

    Batch {
        metric: family.name.clone(),
        points,
    }
}

fn build_point(metric: &str, sample: &Sample, value: f64, timestamp: i64) -> SeriesPoint {
    // BTreeMap iteration keeps resources and tags sorted by label name
    let resources: Vec<Resource> = sample
        .labels
        .iter()
        .map(|(name, value)| Resource {
            kind: name.clone(),
            name: value.clone(),
        })
        .collect();
    let tags = sample
        .labels
        .iter()
        .map(|(name, value)| format!("{}:{}", name, value))
        .collect();

    SeriesPoint {
        metric: metric.to_string(),
        intake_type: IntakeType::Gauge,
        value,
        timestamp,
        resources,
        tags,
    }
}

fn point_timestamp(sample: &Sample, policy: TimestampPolicy, now_secs: i64) -> i64 {
    match (policy, sample.timestamp_ms) {
        (TimestampPolicy::Sample, Some(ms)) => millis_to_epoch_secs(ms),
        _ => now_secs,
    }
}
