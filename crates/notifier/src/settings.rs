//! Runtime settings for the Herald daemon
//!
//! All values come from environment variables (optionally seeded from a
//! dotenv-style file by the binary). Missing or malformed values are fatal at
//! startup; the daemon never runs on a half-configured environment.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Resolved daemon configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Portal root URL
    pub portal_base_url: String,
    /// Portal account credentials
    pub portal_username: String,
    pub portal_password: String,
    /// SMTP relay for outgoing notifications
    pub smtp_host: String,
    pub smtp_port: u16,
    /// SMTP account; also used as the From address
    pub smtp_username: String,
    pub smtp_password: String,
    /// Where the watermark file lives
    pub watermark_path: PathBuf,
    /// Minutes between poll cycles
    pub check_interval_minutes: u64,
    /// Single notification recipient
    pub recipient: String,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// The binary composes the process environment with a parsed env file
    /// here; tests pass a plain closure.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("{key} environment variable not set"))
        };

        let smtp_port: u16 = require("MAIL_SMTP_PORT")?
            .parse()
            .context("MAIL_SMTP_PORT must be a port number")?;
        let check_interval_minutes: u64 = require("CHECK_INTERVAL_MINUTES")?
            .parse()
            .context("CHECK_INTERVAL_MINUTES must be a positive integer")?;

        // No watermark path configured: keep it in the Herald config dir.
        let watermark_path = match lookup("WATERMARK_PATH") {
            Some(path) => PathBuf::from(path),
            None => config::config_path("watermark")
                .context("Could not determine config directory for WATERMARK_PATH")?,
        };

        Ok(Self {
            portal_base_url: require("PORTAL_BASE_URL")?,
            portal_username: require("PORTAL_USERNAME")?,
            portal_password: require("PORTAL_PASSWORD")?,
            smtp_host: require("MAIL_SMTP_HOST")?,
            smtp_port,
            smtp_username: require("MAIL_USERNAME")?,
            smtp_password: require("MAIL_PASSWORD")?,
            watermark_path,
            check_interval_minutes,
            recipient: require("NOTIFICATION_RECIPIENT")?,
        })
    }
}
