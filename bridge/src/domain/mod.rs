//! Domain logic for the bridge
//!
//! - `metrics` - scrape, filter, build and submit cycle

pub mod metrics;

pub use metrics::{CycleReport, CycleStatus, MetricFilter, MetricsPipeline};
