//! Notification email rendering
//!
//! Each notification carries the sender, timestamp, subject and full content
//! of one portal message, as a plain-text part and an HTML alternative.

use crate::models::{MessageRecord, PORTAL_TIME_FORMAT};

/// Subject line for a notification about one message
pub fn notification_subject(record: &MessageRecord) -> String {
    format!("Portal inbox - new message from {}", record.sender)
}

/// Plain-text notification body
pub fn notification_body_plain(record: &MessageRecord) -> String {
    format!(
        "New message in the portal inbox!\n\n\
         From: {}\n\
         Date: {}\n\
         Subject: {}\n\n\
         {}\n\n\
         -- \n\
         Herald, your inbox watcher\n",
        record.sender,
        record.sent_at.format(PORTAL_TIME_FORMAT),
        record.subject,
        record.content.as_deref().unwrap_or("(content unavailable)"),
    )
}

/// HTML notification body
pub fn notification_body_html(record: &MessageRecord) -> String {
    format!(
        "<html><body><p>New message in the portal inbox!</p>\
         <p><b>From:</b> {}<br>\
         <b>Date:</b> {}<br>\
         <b>Subject:</b> {}</p>\
         <p>{}</p>\
         <p>--<br>Herald, your inbox watcher</p></body></html>",
        escape(&record.sender),
        record.sent_at.format(PORTAL_TIME_FORMAT),
        escape(&record.subject),
        escape(record.content.as_deref().unwrap_or("(content unavailable)"))
            .replace('\n', "<br>"),
    )
}

/// Minimal HTML escaping for untrusted portal text
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
