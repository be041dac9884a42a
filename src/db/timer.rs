//! Persistence of the single running timer, and the start/stop workflow.

use crate::db::db::Db;
use crate::db::store::Store;
use crate::libs::error::StoreError;
use crate::libs::interval::IntervalRecord;
use crate::libs::time_math::ClockTime;
use crate::libs::timer::TimerSession;
use chrono::{DateTime, Local};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

const SELECT_TIMER: &str = "SELECT interval_id, started_at FROM timer WHERE id = 1";
const UPSERT_TIMER: &str = "INSERT OR REPLACE INTO timer (id, interval_id, started_at) VALUES (1, ?1, ?2)";
const DELETE_TIMER: &str = "DELETE FROM timer";

pub struct TimerSessions<'a> {
    conn: &'a Connection,
}

impl<'a> TimerSessions<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn current(&self) -> Result<Option<TimerSession>, StoreError> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(SELECT_TIMER, [], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;
        match row {
            Some((interval_id, started_at)) => Ok(Some(TimerSession::from_iso(interval_id, &started_at)?)),
            None => Ok(None),
        }
    }

    /// Stores `session`, replacing whatever session was there.
    pub fn start(&self, session: &TimerSession) -> Result<(), StoreError> {
        self.conn.execute(UPSERT_TIMER, params![session.interval_id, session.start_time_iso()])?;
        Ok(())
    }

    /// Returns whether a session existed.
    pub fn clear(&self) -> Result<bool, StoreError> {
        Ok(self.conn.execute(DELETE_TIMER, [])? > 0)
    }
}

/// Outcome of [`start_timer`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimerStart {
    pub started: IntervalRecord,
    /// The interval whose timer had to be stopped first, if any.
    pub stopped: Option<IntervalRecord>,
    /// The timer was already running on this interval and was left alone.
    pub already_running: bool,
}

fn finish(db: &Db, session: &TimerSession, now: DateTime<Local>) -> Result<IntervalRecord, StoreError> {
    let intervals = db.intervals();
    let mut record = intervals
        .get_by_id(session.interval_id)?
        .ok_or(StoreError::NotFound(session.interval_id))?;
    record.set_end_time(ClockTime::from(now.time()))?;
    intervals.upsert(record)
}

/// Starts timing interval `id` at `now`.
///
/// A timer running on another interval is stopped first. The started
/// interval's start and end are both set to the clock time of `now`. If the
/// timer already runs on `id`, nothing changes and the elapsed time is kept.
pub fn start_timer(db: &Db, id: i64, now: DateTime<Local>) -> Result<TimerStart, StoreError> {
    let tx = db.conn.unchecked_transaction()?;
    let sessions = db.timer();
    let intervals = db.intervals();

    let mut record = intervals.get_by_id(id)?.ok_or(StoreError::NotFound(id))?;

    let stopped = match sessions.current()? {
        Some(running) if running.interval_id == id => {
            return Ok(TimerStart {
                started: record,
                stopped: None,
                already_running: true,
            });
        }
        Some(running) => match finish(db, &running, now) {
            Ok(previous) => Some(previous),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => return Err(e),
        },
        None => None,
    };

    let clock = ClockTime::from(now.time());
    record.set_times(clock, clock);
    let started = intervals.upsert(record)?;
    sessions.start(&TimerSession::new(id, now))?;
    tx.commit()?;

    debug!(interval_id = id, "timer started");
    Ok(TimerStart {
        started,
        stopped,
        already_running: false,
    })
}

/// Stops the running timer, if any, setting its interval's end time to `now`.
///
/// A session whose interval no longer exists is cleared and reported as
/// [`StoreError::NotFound`].
pub fn stop_timer(db: &Db, now: DateTime<Local>) -> Result<Option<IntervalRecord>, StoreError> {
    let tx = db.conn.unchecked_transaction()?;
    let sessions = db.timer();

    let Some(running) = sessions.current()? else {
        return Ok(None);
    };
    let result = match finish(db, &running, now) {
        Ok(record) => Ok(Some(record)),
        Err(StoreError::NotFound(id)) => Err(StoreError::NotFound(id)),
        Err(e) => return Err(e),
    };
    sessions.clear()?;
    tx.commit()?;

    debug!(interval_id = running.interval_id, "timer stopped");
    result
}
