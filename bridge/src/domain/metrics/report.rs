//! Per-cycle summary

use std::fmt;
use std::time::Duration;

/// Outcome of a cycle that got past fetching and parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    /// No attempted batch failed (including cycles with nothing to submit)
    Success,
    /// Some batches failed, others were accepted
    Partial,
    /// Every attempted batch failed
    Failed,
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleStatus::Success => write!(f, "success"),
            CycleStatus::Partial => write!(f, "partial"),
            CycleStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub families_parsed: usize,
    pub families_retained: usize,
    pub batches_submitted: usize,
    pub batches_failed: usize,
    /// Retained families that produced no point
    pub batches_skipped: usize,
    pub points_accepted: usize,
    pub duration: Duration,
}

impl CycleReport {
    pub fn status(&self) -> CycleStatus {
        match (self.batches_submitted, self.batches_failed) {
            (_, 0) => CycleStatus::Success,
            (0, _) => CycleStatus::Failed,
            _ => CycleStatus::Partial,
        }
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status={} parsed={} retained={} submitted={} failed={} skipped={} points={} duration_ms={}",
            self.status(),
            self.families_parsed,
            self.families_retained,
            self.batches_submitted,
            self.batches_failed,
            self.batches_skipped,
            self.points_accepted,
            self.duration.as_millis()
        )
    }
}
