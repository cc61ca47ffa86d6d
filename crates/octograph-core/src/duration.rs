//! Cache freshness windows expressed as `"<n><unit>"` strings or raw milliseconds.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([smhdy])$").expect("valid duration regex"));

/// Freshness window used when the caller does not supply one.
pub const DEFAULT_CACHE_DURATION: &str = "10m";

/// A cache duration as supplied by a caller: either a unit-suffixed string
/// such as `"5m"` or an explicit millisecond count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheDuration {
    Millis(u64),
    Text(String),
}

impl Default for CacheDuration {
    fn default() -> Self {
        Self::Text(DEFAULT_CACHE_DURATION.to_owned())
    }
}

impl From<u64> for CacheDuration {
    fn from(ms: u64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for CacheDuration {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for CacheDuration {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl CacheDuration {
    /// Resolves this value into a concrete [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDurationFormat`] when a string value
    /// does not match `^(\d+)([smhdy])$`.
    pub fn to_duration(&self) -> Result<Duration, CalendarError> {
        match self {
            Self::Millis(ms) => Ok(Duration::from_millis(*ms)),
            Self::Text(s) => parse_cache_duration(s),
        }
    }
}

/// Parses a unit-suffixed duration string.
///
/// Supported units are `s`, `m`, `h`, `d` and `y`; a year is 365 days.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDurationFormat`] for anything that does not
/// match `^(\d+)([smhdy])$`, or whose value overflows a millisecond count.
pub fn parse_cache_duration(input: &str) -> Result<Duration, CalendarError> {
    let invalid = || CalendarError::InvalidDurationFormat(input.to_owned());

    let caps = DURATION_RE.captures(input).ok_or_else(invalid)?;
    let value: u64 = caps[1].parse().map_err(|_| invalid())?;
    let unit_ms: u64 = match &caps[2] {
        "s" => 1_000,
        "m" => 60 * 1_000,
        "h" => 60 * 60 * 1_000,
        "d" => 24 * 60 * 60 * 1_000,
        "y" => 365 * 24 * 60 * 60 * 1_000,
        _ => return Err(invalid()),
    };

    value
        .checked_mul(unit_ms)
        .map(Duration::from_millis)
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(input: &str) -> u128 {
        parse_cache_duration(input).unwrap().as_millis()
    }

    #[test]
    fn parses_every_unit() {
        assert_eq!(ms("30s"), 30_000);
        assert_eq!(ms("5m"), 300_000);
        assert_eq!(ms("2h"), 7_200_000);
        assert_eq!(ms("1d"), 86_400_000);
        assert_eq!(ms("1y"), 31_536_000_000);
    }

    #[test]
    fn zero_is_accepted() {
        assert_eq!(ms("0s"), 0);
    }

    #[test]
    fn rejects_garbage() {
        for input in ["bogus", "", "5", "m", "5 m", "5M", "-5m", "1.5h", "5ms", " 5m"] {
            assert_eq!(
                parse_cache_duration(input),
                Err(CalendarError::InvalidDurationFormat(input.to_owned())),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overflowing_values() {
        let result = parse_cache_duration("99999999999999999999y");
        assert!(matches!(result, Err(CalendarError::InvalidDurationFormat(_))));
    }

    #[test]
    fn millis_pass_through() {
        let d = CacheDuration::from(1_500).to_duration().unwrap();
        assert_eq!(d, Duration::from_millis(1_500));
    }

    #[test]
    fn default_is_ten_minutes() {
        let d = CacheDuration::default().to_duration().unwrap();
        assert_eq!(d, Duration::from_secs(600));
    }

    #[test]
    fn deserializes_number_or_string() {
        let n: CacheDuration = serde_json::from_str("250").unwrap();
        let s: CacheDuration = serde_json::from_str("\"2h\"").unwrap();
        assert_eq!(n, CacheDuration::Millis(250));
        assert_eq!(s, CacheDuration::Text("2h".to_owned()));
    }
}
