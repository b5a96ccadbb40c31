//! Types flowing through one scrape cycle
//!
//! Everything here is built fresh per cycle and dropped when the cycle ends.

use std::collections::BTreeMap;
use std::fmt;

/// Declared type of a metric family in the exposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
    Untyped,
    Histogram,
    Summary,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Gauge => write!(f, "gauge"),
            MetricKind::Counter => write!(f, "counter"),
            MetricKind::Untyped => write!(f, "untyped"),
            MetricKind::Histogram => write!(f, "histogram"),
            MetricKind::Summary => write!(f, "summary"),
        }
    }
}

/// One exposition sample.
///
/// Gauge and untyped values are the only ones the bridge forwards; samples of
/// other kinds carry neither.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    /// Label name to value, unique by name
    pub labels: BTreeMap<String, String>,
    pub gauge: Option<f64>,
    pub untyped: Option<f64>,
    /// Timestamp written on the exposition line, if any
    pub timestamp_ms: Option<i64>,
}

impl Sample {
    /// The forwarded value: gauge first, then untyped
    pub fn value(&self) -> Option<f64> {
        self.gauge.or(self.untyped)
    }
}

/// All samples sharing one metric name
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub name: String,
    pub kind: MetricKind,
    pub samples: Vec<Sample>,
}

/// Resource attached to an outbound point, one per source label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Label name
    pub kind: String,
    /// Label value
    pub name: String,
}

/// Outbound intake type of a series; every forwarded point is a gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeType {
    Gauge = 3,
}

/// One outbound observation
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub metric: String,
    pub intake_type: IntakeType,
    pub value: f64,
    /// Seconds since epoch
    pub timestamp: i64,
    pub resources: Vec<Resource>,
    /// `name:value` per label, same order as `resources`
    pub tags: Vec<String>,
}

/// Points built from one metric family in one cycle, submitted together
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub metric: String,
    pub points: Vec<SeriesPoint>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Acknowledgement for one accepted batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitAck {
    pub series: usize,
}
