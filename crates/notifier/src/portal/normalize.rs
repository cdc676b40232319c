//! Portal API response normalization
//!
//! Converts inbox listing entries to domain MessageRecords.

use anyhow::Result;

use super::api::InboxEntry;
use crate::models::{MessageRecord, parse_portal_time};

/// Normalize one inbox listing entry to a MessageRecord.
///
/// A missing read flag means the portal did not mark the row unread, so the
/// message counts as read. The timestamp must parse; an entry with an invalid
/// timestamp poisons the whole listing rather than silently shifting the
/// watermark.
pub fn normalize_entry(entry: InboxEntry) -> Result<MessageRecord> {
    let sent_at = parse_portal_time(&entry.sent_at)?;

    Ok(MessageRecord::builder(entry.content_link)
        .sender(entry.sender)
        .subject(entry.subject)
        .sent_at(sent_at)
        .read(entry.read.unwrap_or(true))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sent_at: &str, read: Option<bool>) -> InboxEntry {
        InboxEntry {
            sender: "Ms. Teacher".into(),
            subject: "Field trip".into(),
            sent_at: sent_at.into(),
            content_link: "/inbox/messages/42".into(),
            read,
        }
    }

    #[test]
    fn test_normalize_unread_entry() {
        let record = normalize_entry(entry("2023-03-07 14:00:00", Some(false))).unwrap();
        assert_eq!(record.sender, "Ms. Teacher");
        assert_eq!(record.subject, "Field trip");
        assert_eq!(record.sent_at, parse_portal_time("2023-03-07 14:00:00").unwrap());
        assert_eq!(record.content_link.as_str(), "/inbox/messages/42");
        assert!(!record.read);
        assert!(record.content.is_none());
    }

    #[test]
    fn test_missing_read_flag_means_read() {
        let record = normalize_entry(entry("2023-03-07 14:00:00", None)).unwrap();
        assert!(record.read);
    }

    #[test]
    fn test_invalid_timestamp_is_an_error() {
        assert!(normalize_entry(entry("tomorrow-ish", Some(false))).is_err());
    }
}
