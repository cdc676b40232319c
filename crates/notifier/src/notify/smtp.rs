//! SMTP notification dispatch via lettre
//!
//! Builds one multipart (plain + HTML) email per message and sends the batch
//! over a single STARTTLS transport. Per-message failures are counted into
//! the outcome instead of aborting the rest of the batch.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::error;

use super::template::{notification_body_html, notification_body_plain, notification_subject};
use super::{DispatchError, DispatchOutcome, Notifier};
use crate::models::MessageRecord;

/// Notifier sending one email per message through an SMTP relay
pub struct SmtpNotifier {
    host: String,
    port: u16,
    username: String,
    password: String,
}

impl SmtpNotifier {
    /// Create a new SMTP notifier.
    ///
    /// `username` doubles as the From address, as the portal deployment's
    /// mailbox account does.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password: password.into(),
        }
    }

    fn transport(&self) -> Result<SmtpTransport, DispatchError> {
        let transport = SmtpTransport::starttls_relay(&self.host)
            .map_err(|e| DispatchError::Transport(e.to_string()))?
            .port(self.port)
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .build();
        Ok(transport)
    }

    fn parse_mailbox(address: &str) -> Result<Mailbox, DispatchError> {
        address.parse().map_err(|e: lettre::address::AddressError| {
            DispatchError::Address {
                address: address.to_string(),
                reason: e.to_string(),
            }
        })
    }

    fn build_email(
        from: &Mailbox,
        to: &Mailbox,
        record: &MessageRecord,
    ) -> Result<Message, DispatchError> {
        Message::builder()
            .from(from.clone())
            .to(to.clone())
            .subject(notification_subject(record))
            .multipart(MultiPart::alternative_plain_html(
                notification_body_plain(record),
                notification_body_html(record),
            ))
            .map_err(|e| DispatchError::Transport(e.to_string()))
    }
}

impl Notifier for SmtpNotifier {
    fn send(&self, recipient: &str, messages: &[MessageRecord]) -> DispatchOutcome {
        if messages.is_empty() {
            return DispatchOutcome::Delivered;
        }

        let to = match Self::parse_mailbox(recipient) {
            Ok(mailbox) => mailbox,
            Err(e) => return DispatchOutcome::Failed(e),
        };
        let from = match Self::parse_mailbox(&self.username) {
            Ok(mailbox) => mailbox,
            Err(e) => return DispatchOutcome::Failed(e),
        };
        let mailer = match self.transport() {
            Ok(mailer) => mailer,
            Err(e) => return DispatchOutcome::Failed(e),
        };

        let mut delivered = 0;
        let mut failed = 0;
        let mut last_error = None;

        for record in messages {
            let email = match Self::build_email(&from, &to, record) {
                Ok(email) => email,
                Err(e) => {
                    error!("Could not build notification for {:?}: {}", record.subject, e);
                    last_error = Some(e);
                    failed += 1;
                    continue;
                }
            };

            match mailer.send(&email) {
                Ok(_) => delivered += 1,
                Err(e) => {
                    error!("Could not send notification for {:?}: {}", record.subject, e);
                    last_error = Some(DispatchError::Transport(e.to_string()));
                    failed += 1;
                }
            }
        }

        match (delivered, failed) {
            (_, 0) => DispatchOutcome::Delivered,
            (0, _) => DispatchOutcome::Failed(
                last_error.unwrap_or_else(|| DispatchError::Transport("no messages sent".into())),
            ),
            _ => DispatchOutcome::Partial { delivered, failed },
        }
    }
}
