//! Portal inbox integration
//!
//! This module provides:
//! - The InboxPortal trait consumed by the poll loop
//! - A blocking HTTP client that logs in and reads the inbox listing
//! - Response normalization to domain models

mod client;
mod normalize;

pub use client::PortalClient;
pub use normalize::normalize_entry;

use anyhow::Result;

use crate::models::{ContentLink, MessageRecord};

/// Read side of the portal consumed by the poll loop.
///
/// `list_inbox` returns one point-in-time snapshot of the first page of the
/// inbox in portal-native order, newest first. Implementations establish
/// whatever session they need per call; the poll loop never holds one across
/// cycles.
pub trait InboxPortal: Send + Sync {
    /// Fetch the current first-page inbox listing, newest first.
    fn list_inbox(&self) -> Result<Vec<MessageRecord>>;

    /// Fetch the full body for one message.
    fn fetch_content(&self, link: &ContentLink) -> Result<String>;
}

/// Portal API payload types
pub mod api {
    use serde::{Deserialize, Serialize};

    /// Login request body
    #[derive(Debug, Serialize)]
    pub struct LoginRequest<'a> {
        pub username: &'a str,
        pub password: &'a str,
    }

    /// Response from the inbox listing endpoint
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InboxResponse {
        pub messages: Option<Vec<InboxEntry>>,
    }

    /// One row of the inbox listing
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InboxEntry {
        pub sender: String,
        pub subject: String,
        /// Portal timestamp string, `YYYY-MM-DD HH:MM:SS`
        pub sent_at: String,
        /// Relative link used to fetch the body
        pub content_link: String,
        /// Unread messages carry `read: false`; a missing flag means read
        pub read: Option<bool>,
    }

    /// Response from a message content endpoint
    #[derive(Debug, Deserialize)]
    pub struct ContentResponse {
        pub content: String,
    }
}
