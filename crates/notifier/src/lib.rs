//! Notifier crate - core logic for the Herald portal inbox watcher
//!
//! This crate provides the poll-detect-notify pipeline with no UI or
//! process-level dependencies:
//! - Domain models (MessageRecord, Watermark)
//! - Pure change detection against the persisted watermark
//! - Watermark store abstractions (file-backed, in-memory)
//! - Portal HTTP client behind the InboxPortal trait
//! - SMTP notification dispatch behind the Notifier trait
//! - The poll loop controller driving one cycle at a time

pub mod detect;
pub mod models;
pub mod notify;
pub mod poll;
pub mod portal;
pub mod settings;
pub mod store;

pub use detect::{Detection, detect_new};
pub use models::{ContentLink, MessageRecord, Watermark};
pub use notify::{DispatchError, DispatchOutcome, Notifier, SmtpNotifier};
pub use poll::{CycleStats, PollController, Shutdown, effective_interval, run_cycle};
pub use portal::{InboxPortal, PortalClient};
pub use settings::Settings;
pub use store::{FileWatermarkStore, InMemoryWatermarkStore, WatermarkStore};
