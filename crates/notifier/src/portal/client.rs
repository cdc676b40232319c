//! Portal HTTP client
//!
//! Uses synchronous HTTP (ureq) to be executor-agnostic. The agent keeps the
//! session cookie handed out by the login endpoint; a fresh login happens at
//! the start of every listing call, matching the portal's short-lived
//! sessions.

use anyhow::{Context, Result};
use log::{debug, info};
use url::Url;

use super::api::{ContentResponse, InboxResponse, LoginRequest};
use super::{InboxPortal, normalize_entry};
use crate::models::{ContentLink, MessageRecord};

/// Blocking client for the portal's inbox API
pub struct PortalClient {
    agent: ureq::Agent,
    base_url: Url,
    username: String,
    password: String,
}

impl PortalClient {
    /// Login endpoint, relative to the base URL
    const LOGIN_PATH: &'static str = "api/login";
    /// First-page inbox listing endpoint, relative to the base URL
    const INBOX_PATH: &'static str = "api/inbox";

    /// Create a new portal client
    ///
    /// # Arguments
    /// * `base_url` - Portal root, e.g. `https://portal.example.com/`
    /// * `username` / `password` - Portal account credentials
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid portal base URL: {base_url}"))?;

        Ok(Self {
            agent: ureq::Agent::new_with_defaults(),
            base_url,
            username: username.into(),
            password: password.into(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid portal endpoint: {path}"))
    }

    /// Establish a session; the agent's cookie store carries it afterwards.
    fn login(&self) -> Result<()> {
        let url = self.endpoint(Self::LOGIN_PATH)?;
        self.agent
            .post(url.as_str())
            .send_json(LoginRequest {
                username: &self.username,
                password: &self.password,
            })
            .context("Portal login failed")?;
        debug!("Logged in to portal as {}", self.username);
        Ok(())
    }
}

impl InboxPortal for PortalClient {
    fn list_inbox(&self) -> Result<Vec<MessageRecord>> {
        self.login()?;

        let url = self.endpoint(Self::INBOX_PATH)?;
        let mut response = self
            .agent
            .get(url.as_str())
            .call()
            .context("Failed to fetch inbox listing")?;

        let listing: InboxResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse inbox listing")?;

        let entries = listing.messages.unwrap_or_default();
        info!("Portal listing returned {} message(s)", entries.len());

        entries.into_iter().map(normalize_entry).collect()
    }

    fn fetch_content(&self, link: &ContentLink) -> Result<String> {
        let url = self.endpoint(link.as_str())?;
        let mut response = self
            .agent
            .get(url.as_str())
            .call()
            .with_context(|| format!("Failed to fetch message content: {}", link.as_str()))?;

        let body: ContentResponse = response
            .body_mut()
            .read_json()
            .with_context(|| format!("Failed to parse message content: {}", link.as_str()))?;

        Ok(body.content)
    }
}
