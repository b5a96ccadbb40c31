//! Time utility functions

use chrono::Utc;

/// Current wall-clock time in whole seconds since the Unix epoch
pub fn now_epoch_secs() -> i64 {
    Utc::now().timestamp()
}

/// Truncate a millisecond epoch timestamp to whole seconds (floor)
pub fn millis_to_epoch_secs(millis: i64) -> i64 {
    millis.div_euclid(1000)
}
