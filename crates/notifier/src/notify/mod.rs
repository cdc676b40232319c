//! Notification dispatch
//!
//! This module provides:
//! - The Notifier trait consumed by the poll loop
//! - Dispatch outcomes distinguishing full, partial and total failure
//! - An SMTP implementation sending one email per new message

mod smtp;
mod template;

pub use smtp::SmtpNotifier;
pub use template::{notification_body_html, notification_body_plain, notification_subject};

use crate::models::MessageRecord;

/// Errors that make a whole dispatch batch fail
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid mail address {address:?}: {reason}")]
    Address { address: String, reason: String },

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Outcome of dispatching one batch of notifications.
///
/// Anything other than `Delivered` tells the controller to withhold the
/// watermark save, trading possible duplicates next cycle for never silently
/// losing a notification.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Every message in the batch was sent
    Delivered,
    /// Some messages were sent, some were not
    Partial { delivered: usize, failed: usize },
    /// Nothing was sent
    Failed(DispatchError),
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Number of messages that actually went out
    pub fn delivered_count(&self, batch_size: usize) -> usize {
        match self {
            Self::Delivered => batch_size,
            Self::Partial { delivered, .. } => *delivered,
            Self::Failed(_) => 0,
        }
    }
}

/// Dispatch seam for notification emails.
pub trait Notifier: Send + Sync {
    /// Send one notification per message to the recipient, as one logical
    /// batch, in the given order.
    fn send(&self, recipient: &str, messages: &[MessageRecord]) -> DispatchOutcome;
}
