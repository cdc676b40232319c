//! One poll cycle: list, detect, fetch content, dispatch, persist
//!
//! The watermark is saved only after the dispatcher reports full delivery
//! (or after the decision to skip an empty batch). A failed or partial
//! dispatch leaves the old watermark in place, so the next cycle re-detects
//! the same messages rather than losing them.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{debug, error, info, warn};

use crate::detect::{Detection, detect_new};
use crate::models::{ContentLink, Watermark};
use crate::notify::{DispatchOutcome, Notifier};
use crate::portal::InboxPortal;
use crate::store::WatermarkStore;

/// Statistics from one poll cycle
#[derive(Debug, Default, Clone)]
pub struct CycleStats {
    /// Number of messages in the inbox snapshot
    pub listed: usize,
    /// Number of messages eligible for notification
    pub eligible: usize,
    /// Eligible messages dropped because their content fetch failed twice
    pub skipped_content: usize,
    /// Number of notifications actually delivered
    pub notified: usize,
    /// Whether the next watermark was persisted
    pub watermark_saved: bool,
    /// Duration of the cycle
    pub duration_ms: u64,
}

/// Run one poll-detect-notify cycle.
///
/// `now` is the wall-clock time used for the first-run watermark fallback;
/// the controller passes the current local time.
///
/// A listing failure aborts the cycle with an error and no watermark write.
/// A content fetch failure for one message is retried once, then the message
/// is skipped without aborting the batch.
pub fn run_cycle(
    portal: &dyn InboxPortal,
    store: &dyn WatermarkStore,
    notifier: &dyn Notifier,
    recipient: &str,
    now: NaiveDateTime,
) -> Result<CycleStats> {
    let start = std::time::Instant::now();
    let mut stats = CycleStats::default();

    let watermark = store.load().unwrap_or_else(|| {
        let fallback = Watermark::fallback(now);
        info!("No stored watermark, starting from {fallback}");
        fallback
    });
    debug!("Checking for messages newer than {watermark}");

    let snapshot = portal.list_inbox().context("Inbox snapshot failed")?;
    stats.listed = snapshot.len();

    let Detection {
        new_messages,
        next_watermark,
    } = detect_new(snapshot, watermark);
    stats.eligible = new_messages.len();

    let mut to_send = Vec::with_capacity(new_messages.len());
    for message in new_messages {
        match fetch_content_with_retry(portal, &message.content_link) {
            Ok(content) => to_send.push(message.with_content(content)),
            Err(e) => {
                error!(
                    "Skipping message {:?} sent {}: {:#}",
                    message.subject, message.sent_at, e
                );
                stats.skipped_content += 1;
            }
        }
    }

    if to_send.is_empty() {
        // Nothing to dispatch; the snapshot itself is what advances the
        // watermark.
        store
            .save(next_watermark)
            .context("Failed to persist watermark")?;
        stats.watermark_saved = true;
        stats.duration_ms = start.elapsed().as_millis() as u64;
        return Ok(stats);
    }

    match notifier.send(recipient, &to_send) {
        DispatchOutcome::Delivered => {
            stats.notified = to_send.len();
            store
                .save(next_watermark)
                .context("Failed to persist watermark")?;
            stats.watermark_saved = true;
            info!("Sent {} notification(s)", stats.notified);
        }
        DispatchOutcome::Partial { delivered, failed } => {
            stats.notified = delivered;
            warn!(
                "Partial dispatch ({delivered} sent, {failed} failed); \
                 keeping watermark at {watermark} so the batch is retried"
            );
        }
        DispatchOutcome::Failed(e) => {
            error!("Dispatch failed, keeping watermark at {watermark}: {e}");
        }
    }

    stats.duration_ms = start.elapsed().as_millis() as u64;
    Ok(stats)
}

/// Fetch a message body, retrying once before giving up.
fn fetch_content_with_retry(portal: &dyn InboxPortal, link: &ContentLink) -> Result<String> {
    match portal.fetch_content(link) {
        Ok(content) => Ok(content),
        Err(first) => {
            debug!("Content fetch failed, retrying once: {first:#}");
            portal.fetch_content(link)
        }
    }
}
