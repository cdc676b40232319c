//! Domain models for inbox watching

mod message;
mod watermark;

pub use message::{ContentLink, MessageRecord};
pub use watermark::{PORTAL_TIME_FORMAT, Watermark, parse_portal_time};
