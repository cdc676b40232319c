//! Message model representing one inbox entry

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Opaque handle used to fetch a message body from the portal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentLink(pub String);

impl ContentLink {
    pub fn new(link: impl Into<String>) -> Self {
        Self(link.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ContentLink {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ContentLink {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One entry from the portal inbox listing.
///
/// Records live for a single poll cycle: built from the listing snapshot,
/// optionally enriched with the full body, handed to the dispatcher and then
/// discarded. Only the watermark outlives the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Sender as shown by the portal
    pub sender: String,
    /// Subject line
    pub subject: String,
    /// When the message was sent (portal-local, second precision)
    pub sent_at: NaiveDateTime,
    /// Handle used to fetch the full body
    pub content_link: ContentLink,
    /// Read status at snapshot time
    pub read: bool,
    /// Full body, populated only after the detail fetch
    pub content: Option<String>,
}

impl MessageRecord {
    /// Create a new message record builder
    pub fn builder(content_link: impl Into<ContentLink>) -> MessageRecordBuilder {
        MessageRecordBuilder::new(content_link.into())
    }

    /// Return a copy of this record with the full body attached
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Builder for creating MessageRecord instances
pub struct MessageRecordBuilder {
    sender: String,
    subject: String,
    sent_at: Option<NaiveDateTime>,
    content_link: ContentLink,
    read: bool,
}

impl MessageRecordBuilder {
    fn new(content_link: ContentLink) -> Self {
        Self {
            sender: String::new(),
            subject: String::new(),
            sent_at: None,
            content_link,
            read: false,
        }
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn sent_at(mut self, sent_at: NaiveDateTime) -> Self {
        self.sent_at = Some(sent_at);
        self
    }

    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    pub fn build(self) -> MessageRecord {
        MessageRecord {
            sender: self.sender,
            subject: self.subject,
            sent_at: self
                .sent_at
                .unwrap_or_else(|| chrono::Local::now().naive_local()),
            content_link: self.content_link,
            read: self.read,
            content: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_portal_time;

    #[test]
    fn test_builder() {
        let sent_at = parse_portal_time("2023-03-07 14:00:00").unwrap();
        let record = MessageRecord::builder("/inbox/42")
            .sender("Ms. Teacher")
            .subject("Homework")
            .sent_at(sent_at)
            .read(false)
            .build();

        assert_eq!(record.sender, "Ms. Teacher");
        assert_eq!(record.subject, "Homework");
        assert_eq!(record.sent_at, sent_at);
        assert_eq!(record.content_link.as_str(), "/inbox/42");
        assert!(!record.read);
        assert!(record.content.is_none());
    }

    #[test]
    fn test_serialization() {
        let record = MessageRecord::builder("/inbox/42")
            .sender("Ms. Teacher")
            .subject("Homework")
            .sent_at(parse_portal_time("2023-03-07 14:00:00").unwrap())
            .read(true)
            .build();

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MessageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_with_content() {
        let record = MessageRecord::builder("/inbox/7")
            .sender("office@example.com")
            .build()
            .with_content("Please sign the permission slip.");
        assert_eq!(
            record.content.as_deref(),
            Some("Please sign the permission slip.")
        );
    }
}
