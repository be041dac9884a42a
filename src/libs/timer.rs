//! The single running interval timer.
//!
//! A [`TimerSession`] says "this interval is running since `started_at`".
//! While it exists, the interval's displayed duration is computed live from
//! the current time instead of read from storage. Keeping at most one session
//! is the job of the owner (see [`crate::db::timer::TimerSessions`]); the
//! functions here only compute with an explicitly passed session.

use crate::libs::error::FormatError;
use crate::libs::interval::IntervalRecord;
use crate::libs::time_math::{self, ClockTime};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSession {
    pub interval_id: i64,
    #[serde(rename = "startTimeISO")]
    pub started_at: DateTime<Local>,
}

impl TimerSession {
    pub fn new(interval_id: i64, started_at: DateTime<Local>) -> Self {
        TimerSession { interval_id, started_at }
    }

    /// Parses the stored RFC 3339 start timestamp.
    pub fn from_iso(interval_id: i64, started_at: &str) -> Result<Self, FormatError> {
        let started_at = DateTime::parse_from_rfc3339(started_at)
            .map_err(|_| FormatError::Timestamp(started_at.to_string()))?
            .with_timezone(&Local);
        Ok(TimerSession { interval_id, started_at })
    }

    pub fn start_time_iso(&self) -> String {
        self.started_at.to_rfc3339()
    }

    /// Clock time of day at which the session started.
    pub fn start_clock_time(&self) -> ClockTime {
        ClockTime::from(self.started_at.time())
    }

    /// Seconds elapsed since the start; zero if `now` is before it.
    pub fn elapsed(&self, now: DateTime<Local>) -> u64 {
        (now - self.started_at).num_seconds().max(0) as u64
    }

    pub fn is_for(&self, record: &IntervalRecord) -> bool {
        record.id == Some(self.interval_id)
    }
}

/// The duration to show for `record` at `now`.
///
/// A record with a running session shows the live elapsed time; every other
/// record shows its stored duration.
pub fn display_duration(record: &IntervalRecord, session: Option<&TimerSession>, now: DateTime<Local>) -> String {
    match session {
        Some(session) if session.is_for(record) => time_math::format_duration(session.elapsed(now)),
        _ => record.duration.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(id: i64) -> IntervalRecord {
        IntervalRecord {
            id: Some(id),
            name: "Run".into(),
            date: "2024-06-01".into(),
            start_time: "08:00:00".into(),
            end_time: "08:00:00".into(),
            duration: "00:00:00".into(),
            is_dif_days: false,
            category: String::new(),
        }
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, h, m, s).unwrap()
    }

    #[test]
    fn live_duration_only_for_matching_interval() {
        let session = TimerSession::new(7, at(8, 0, 0));
        let now = at(9, 15, 30);
        assert_eq!(display_duration(&record(7), Some(&session), now), "01:15:30");
        assert_eq!(display_duration(&record(8), Some(&session), now), "00:00:00");
        assert_eq!(display_duration(&record(7), None, now), "00:00:00");
    }

    #[test]
    fn elapsed_is_clamped_and_can_exceed_a_day() {
        let session = TimerSession::new(1, at(8, 0, 0));
        assert_eq!(session.elapsed(at(7, 0, 0)), 0);
        assert_eq!(session.elapsed(at(8, 0, 0) + Duration::hours(25)), 25 * 3600);
    }

    #[test]
    fn iso_round_trip() {
        let session = TimerSession::new(3, at(10, 20, 30));
        let parsed = TimerSession::from_iso(3, &session.start_time_iso()).unwrap();
        assert_eq!(parsed, session);
        assert_eq!(parsed.start_clock_time().to_string(), "10:20:30");
        assert!(TimerSession::from_iso(3, "yesterday").is_err());
    }
}
