//! Clock-time and duration arithmetic.
//!
//! Converts between `HH:MM:SS` strings, seconds-of-day and duration strings,
//! and computes the elapsed time of an interval given its start and end
//! clock times, including the midnight rollover case.
//!
//! ## Canonical formats
//!
//! - Clock times and durations always render as zero-padded `HH:MM:SS`.
//!   Parsing also accepts a single-digit hour (`9:05:00`), which older
//!   timer-written records contain, but output is always two digits.
//! - Aggregated durations keep the same shape and let the hours field grow
//!   past 23 (`31:15:00`).
//! - Calendar dates are `YYYY-MM-DD`, local-naive, with no time-zone part.
//!
//! ## Examples
//!
//! ```rust
//! use tally::libs::time_math::{compute_duration, format_duration, ClockTime};
//!
//! let start: ClockTime = "23:00:00".parse().unwrap();
//! let end: ClockTime = "01:00:00".parse().unwrap();
//! let (duration, crossed_midnight) = compute_duration(start, end);
//! assert_eq!(duration.to_string(), "02:00:00");
//! assert!(crossed_midnight);
//!
//! assert_eq!(format_duration(90_000), "25:00:00");
//! ```

use crate::libs::error::FormatError;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const SECONDS_PER_DAY: u32 = 86_400;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A time-of-day with seconds resolution, `00:00:00` through `23:59:59`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hours: 0, minutes: 0, seconds: 0 };

    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Result<Self, FormatError> {
        let value = || format!("{}:{:02}:{:02}", hours, minutes, seconds);
        if hours > 23 {
            return Err(FormatError::OutOfRange { value: value(), component: "hours", max: 23 });
        }
        if minutes > 59 {
            return Err(FormatError::OutOfRange { value: value(), component: "minutes", max: 59 });
        }
        if seconds > 59 {
            return Err(FormatError::OutOfRange { value: value(), component: "seconds", max: 59 });
        }
        Ok(ClockTime {
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
        })
    }

    /// Builds a clock time from seconds since midnight (`0..86400`).
    pub fn from_seconds_of_day(total: u32) -> Result<Self, FormatError> {
        if total >= SECONDS_PER_DAY {
            return Err(FormatError::OutOfRange {
                value: total.to_string(),
                component: "seconds-of-day",
                max: SECONDS_PER_DAY - 1,
            });
        }
        Self::new(total / 3600, (total % 3600) / 60, total % 60)
    }

    pub fn hours(&self) -> u32 {
        self.hours as u32
    }

    pub fn minutes(&self) -> u32 {
        self.minutes as u32
    }

    pub fn seconds(&self) -> u32 {
        self.seconds as u32
    }

    pub fn seconds_of_day(&self) -> u32 {
        to_seconds_of_day(*self)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        ClockTime {
            hours: time.hour() as u8,
            minutes: time.minute() as u8,
            seconds: time.second() as u8,
        }
    }
}

impl FromStr for ClockTime {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_clock_time(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_clock_time(&value)
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Splits `s` into its three `:`-separated numeric components.
///
/// `max_hour_digits` bounds the width of the first component; minutes and
/// seconds must be exactly two digits.
fn split_components(s: &str, max_hour_digits: usize) -> Result<(u64, u32, u32), FormatError> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(FormatError::Shape(s.to_string()));
    }
    if parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return Err(FormatError::NotNumeric(s.to_string()));
    }
    if parts[0].len() > max_hour_digits || parts[1].len() != 2 || parts[2].len() != 2 {
        return Err(FormatError::Shape(s.to_string()));
    }

    let hours: u64 = parts[0].parse().map_err(|_| FormatError::NotNumeric(s.to_string()))?;
    let minutes: u32 = parts[1].parse().map_err(|_| FormatError::NotNumeric(s.to_string()))?;
    let seconds: u32 = parts[2].parse().map_err(|_| FormatError::NotNumeric(s.to_string()))?;
    Ok((hours, minutes, seconds))
}

/// Parses an `HH:MM:SS` (or `H:MM:SS`) time of day.
pub fn parse_clock_time(s: &str) -> Result<ClockTime, FormatError> {
    let (hours, minutes, seconds) = split_components(s.trim(), 2)?;
    ClockTime::new(hours as u32, minutes, seconds).map_err(|e| match e {
        FormatError::OutOfRange { component, max, .. } => FormatError::OutOfRange {
            value: s.to_string(),
            component,
            max,
        },
        other => other,
    })
}

pub fn to_seconds_of_day(t: ClockTime) -> u32 {
    t.hours() * 3600 + t.minutes() * 60 + t.seconds()
}

/// Elapsed time from `start` to `end`, and whether the interval crossed midnight.
///
/// When `end` is earlier than `start` the end is taken to be on the next
/// calendar day. Equal times give a zero-length interval, not a full day.
pub fn compute_duration(start: ClockTime, end: ClockTime) -> (ClockTime, bool) {
    let s = to_seconds_of_day(start);
    let e = to_seconds_of_day(end);

    let (elapsed, crossed_midnight) = if e < s { ((SECONDS_PER_DAY - s) + e, true) } else { (e - s, false) };

    // elapsed < SECONDS_PER_DAY in both branches
    let duration = ClockTime::from_seconds_of_day(elapsed).unwrap_or(ClockTime::MIDNIGHT);
    (duration, crossed_midnight)
}

/// Formats a number of seconds as `HH:MM:SS`; hours are not clamped to 23.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Parses a duration string back to seconds. The inverse of [`format_duration`].
///
/// Unlike [`parse_clock_time`] the hours field may exceed 23.
pub fn duration_to_seconds(s: &str) -> Result<u64, FormatError> {
    let trimmed = s.trim();
    let (hours, minutes, seconds) = split_components(trimmed, 10)?;
    if minutes > 59 {
        return Err(FormatError::OutOfRange { value: s.to_string(), component: "minutes", max: 59 });
    }
    if seconds > 59 {
        return Err(FormatError::OutOfRange { value: s.to_string(), component: "seconds", max: 59 });
    }
    Ok(hours * 3600 + minutes as u64 * 60 + seconds as u64)
}

pub fn date_to_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn string_to_date(s: &str) -> Result<NaiveDate, FormatError> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes.iter().enumerate().all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(FormatError::Date(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| FormatError::Date(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn rollover_cases() {
        assert_eq!(compute_duration(t("23:00:00"), t("01:00:00")), (t("02:00:00"), true));
        assert_eq!(compute_duration(t("09:00:00"), t("17:30:00")), (t("08:30:00"), false));
        assert_eq!(compute_duration(t("10:00:00"), t("10:00:00")), (t("00:00:00"), false));
    }

    #[test]
    fn duration_never_exceeds_one_day() {
        let (d, crossed) = compute_duration(t("00:00:01"), t("00:00:00"));
        assert!(crossed);
        assert_eq!(d.to_string(), "23:59:59");
        assert!(d.seconds_of_day() <= 86_399);
    }

    #[test]
    fn non_negative_over_a_grid() {
        for s in (0..SECONDS_PER_DAY).step_by(3_607) {
            for e in (0..SECONDS_PER_DAY).step_by(4_001) {
                let start = ClockTime::from_seconds_of_day(s).unwrap();
                let end = ClockTime::from_seconds_of_day(e).unwrap();
                let (d, crossed) = compute_duration(start, end);
                assert!(d.seconds_of_day() < SECONDS_PER_DAY);
                assert_eq!(crossed, e < s);
            }
        }
    }

    #[test]
    fn parse_accepts_single_digit_hour() {
        let time = parse_clock_time("9:05:07").unwrap();
        assert_eq!((time.hours(), time.minutes(), time.seconds()), (9, 5, 7));
        assert_eq!(time.to_string(), "09:05:07");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!(parse_clock_time("12:00"), Err(FormatError::Shape("12:00".into())));
        assert_eq!(parse_clock_time("12:aa:00"), Err(FormatError::NotNumeric("12:aa:00".into())));
        assert!(matches!(parse_clock_time("24:00:00"), Err(FormatError::OutOfRange { component: "hours", .. })));
        assert!(matches!(parse_clock_time("12:60:00"), Err(FormatError::OutOfRange { component: "minutes", .. })));
        assert!(matches!(parse_clock_time("12:00:61"), Err(FormatError::OutOfRange { component: "seconds", .. })));
        assert!(parse_clock_time("12:0:00").is_err());
        assert!(parse_clock_time("-1:00:00").is_err());
    }

    #[test]
    fn seconds_of_day() {
        assert_eq!(to_seconds_of_day(t("01:02:03")), 3723);
        assert_eq!(to_seconds_of_day(t("23:59:59")), 86_399);
        assert!(ClockTime::from_seconds_of_day(86_400).is_err());
    }

    #[test]
    fn format_duration_does_not_clamp_hours() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(8100), "02:15:00");
        assert_eq!(format_duration(100 * 3600 + 61), "100:01:01");
    }

    #[test]
    fn duration_to_seconds_inverts_format() {
        assert_eq!(duration_to_seconds("02:15:00"), Ok(8100));
        assert_eq!(duration_to_seconds("31:00:05"), Ok(111_605));
        assert_eq!(duration_to_seconds(&format_duration(987_654)), Ok(987_654));
        assert!(duration_to_seconds("bad").is_err());
        assert!(duration_to_seconds("01:61:00").is_err());
    }

    #[test]
    fn date_round_trip() {
        for s in ["2024-01-01", "2024-02-29", "1999-12-31"] {
            assert_eq!(date_to_string(string_to_date(s).unwrap()), s);
        }
    }

    #[test]
    fn date_rejects_loose_forms() {
        assert!(string_to_date("2024-1-05").is_err());
        assert!(string_to_date("2023-02-29").is_err());
        assert!(string_to_date("2024/01/05").is_err());
        assert!(string_to_date("2024-01-05T00:00:00").is_err());
    }

    #[test]
    fn serde_uses_canonical_string() {
        let json = serde_json::to_string(&t("7:08:09")).unwrap();
        assert_eq!(json, "\"07:08:09\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t("07:08:09"));
        assert!(serde_json::from_str::<ClockTime>("\"25:00:00\"").is_err());
    }
}
