//! Incremental change detection against the persisted watermark
//!
//! Pure functions with no I/O; the rest of the pipeline is adapters around
//! this module.

use crate::models::{MessageRecord, Watermark};

/// Result of one detection pass over an inbox snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Messages eligible for notification, in snapshot order (newest first)
    pub new_messages: Vec<MessageRecord>,
    /// Watermark to persist once this cycle's dispatch succeeds
    pub next_watermark: Watermark,
}

/// Compute which messages in a snapshot are new since the watermark.
///
/// The snapshot is the first page of the inbox in portal-native order, newest
/// first. A message is eligible iff it was sent strictly after the watermark
/// and is unread; a message sent exactly at the watermark counts as already
/// seen. Eligible messages keep their snapshot order, which is the order the
/// dispatcher receives.
///
/// The next watermark is the time-sent of the snapshot's first entry,
/// independent of how many messages were eligible. Read messages newer than
/// the watermark are never notified but still advance it. The watermark is
/// not clamped: a snapshot whose newest entry is older than the current
/// watermark moves it backward. An empty snapshot leaves the watermark
/// untouched, so a transient empty page never rewinds history.
///
/// Note the first entry is trusted to be the globally newest message; an
/// upstream ordering change would silently break watermark computation.
pub fn detect_new(snapshot: Vec<MessageRecord>, watermark: Watermark) -> Detection {
    let Some(first) = snapshot.first() else {
        return Detection {
            new_messages: Vec::new(),
            next_watermark: watermark,
        };
    };

    let next_watermark = Watermark::new(first.sent_at);

    let new_messages = snapshot
        .into_iter()
        .filter(|m| m.sent_at > watermark.as_datetime() && !m.read)
        .collect();

    Detection {
        new_messages,
        next_watermark,
    }
}
