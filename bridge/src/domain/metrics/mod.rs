//! Metrics Forwarding Pipeline
//!
//! Scrapes the Prometheus exposition, keeps the allow-listed families, turns
//! their gauge and untyped samples into Datadog series and submits one batch
//! per family.

mod filter;
mod pipeline;
mod report;
mod series;
mod submit;

pub use filter::MetricFilter;
pub use pipeline::MetricsPipeline;
pub use report::{CycleReport, CycleStatus};
