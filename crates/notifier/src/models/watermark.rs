//! Watermark marking the boundary between processed and unprocessed messages

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// Canonical timestamp format used by the portal and the watermark file:
/// `YYYY-MM-DD HH:MM:SS`, second precision, no timezone marker.
pub const PORTAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Grace window applied on first run, so a fresh deployment does not
/// re-notify the entire inbox history.
const STARTUP_GRACE_MINUTES: i64 = 5;

/// Parse a portal timestamp string (e.g. `2023-03-07 13:09:54`).
pub fn parse_portal_time(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), PORTAL_TIME_FORMAT)
        .with_context(|| format!("Invalid portal timestamp: {s:?}"))
}

/// The time-sent of the most recent message already processed as of the end
/// of the last successful cycle.
///
/// Ordering is by timestamp; the round-trip through [`fmt::Display`] and
/// [`Watermark::parse`] is exact at second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Watermark(NaiveDateTime);

impl Watermark {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// Parse the canonical string representation.
    pub fn parse(s: &str) -> Result<Self> {
        parse_portal_time(s).map(Self)
    }

    /// Startup default when no watermark has been persisted yet:
    /// `now` minus a short grace window.
    pub fn fallback(now: NaiveDateTime) -> Self {
        Self(now - Duration::minutes(STARTUP_GRACE_MINUTES))
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(PORTAL_TIME_FORMAT))
    }
}

impl FromStr for Watermark {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<NaiveDateTime> for Watermark {
    fn from(at: NaiveDateTime) -> Self {
        Self(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        let w = Watermark::parse("2023-03-07 13:09:54").unwrap();
        assert_eq!(w.to_string(), "2023-03-07 13:09:54");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let w = Watermark::parse("  2023-03-07 13:09:54\n").unwrap();
        assert_eq!(w.to_string(), "2023-03-07 13:09:54");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Watermark::parse("").is_err());
        assert!(Watermark::parse("not a timestamp").is_err());
        assert!(Watermark::parse("2023-03-07T13:09:54Z").is_err());
        assert!(Watermark::parse("2023-13-40 99:99:99").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let w = Watermark::parse("2022-12-11 13:28:54").unwrap();
        let again = Watermark::parse(&w.to_string()).unwrap();
        assert_eq!(w, again);
    }

    #[test]
    fn test_ordering() {
        let older = Watermark::parse("2023-03-07 13:00:00").unwrap();
        let newer = Watermark::parse("2023-03-07 14:00:00").unwrap();
        assert!(older < newer);
        assert_eq!(older, Watermark::parse("2023-03-07 13:00:00").unwrap());
    }

    #[test]
    fn test_fallback_applies_grace_window() {
        let now = parse_portal_time("2023-03-07 13:09:54").unwrap();
        let w = Watermark::fallback(now);
        assert_eq!(w.to_string(), "2023-03-07 13:04:54");
    }
}
