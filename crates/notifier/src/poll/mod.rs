//! Poll loop driving the fetch-detect-notify cycle
//!
//! One sequential worker: a cycle (including its sleep) always finishes
//! before the next one starts, so there is at most one portal session and one
//! watermark writer at any time.

mod cycle;
mod shutdown;
mod timing;

pub use cycle::{CycleStats, run_cycle};
pub use shutdown::Shutdown;
pub use timing::effective_interval;

use log::{debug, error, info};

use crate::notify::Notifier;
use crate::portal::InboxPortal;
use crate::store::WatermarkStore;

/// Owns the collaborators and loops cycles until shutdown
pub struct PollController {
    portal: Box<dyn InboxPortal>,
    store: Box<dyn WatermarkStore>,
    notifier: Box<dyn Notifier>,
    recipient: String,
    interval_minutes: u64,
}

impl PollController {
    pub fn new(
        portal: Box<dyn InboxPortal>,
        store: Box<dyn WatermarkStore>,
        notifier: Box<dyn Notifier>,
        recipient: impl Into<String>,
        interval_minutes: u64,
    ) -> Self {
        Self {
            portal,
            store,
            notifier,
            recipient: recipient.into(),
            interval_minutes,
        }
    }

    /// Run cycles until `shutdown` is requested.
    ///
    /// Cycle failures are logged and the loop carries on; only shutdown ends
    /// it. The inter-cycle sleep is the cancellation point.
    pub fn run(&self, shutdown: &Shutdown) {
        let interval = effective_interval(self.interval_minutes);
        info!(
            "Starting poll loop, checking for new messages every {} minute(s)",
            interval.as_secs() / 60
        );

        while !shutdown.is_requested() {
            let now = chrono::Local::now().naive_local();
            match run_cycle(
                self.portal.as_ref(),
                self.store.as_ref(),
                self.notifier.as_ref(),
                &self.recipient,
                now,
            ) {
                Ok(stats) if stats.notified > 0 => {
                    info!(
                        "Cycle done: {} listed, {} new, {} notified in {} ms",
                        stats.listed, stats.eligible, stats.notified, stats.duration_ms
                    );
                }
                Ok(stats) => {
                    debug!(
                        "Cycle done: {} listed, nothing to notify ({} ms)",
                        stats.listed, stats.duration_ms
                    );
                }
                Err(e) => error!("Poll cycle failed: {e:#}"),
            }

            if shutdown.wait_timeout(interval) {
                break;
            }
        }

        info!("Poll loop stopped");
    }
}
