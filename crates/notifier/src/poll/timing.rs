//! Poll interval handling
//!
//! Pure functions that can be tested without running the loop.

use std::time::Duration;

/// Minimum allowed interval between cycles, in minutes
const MIN_INTERVAL_MINUTES: u64 = 1;

/// Convert a configured interval in minutes to the sleep duration.
///
/// A misconfigured zero interval clamps to one minute instead of busy
/// polling the portal.
pub fn effective_interval(minutes: u64) -> Duration {
    Duration::from_secs(60 * minutes.max(MIN_INTERVAL_MINUTES))
}
