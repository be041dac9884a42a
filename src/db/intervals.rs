use crate::db::store::Store;
use crate::libs::category;
use crate::libs::error::StoreError;
use crate::libs::interval::{self, IntervalRecord};
use crate::libs::time_math;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str = "id, name, date, start_time, end_time, duration, is_dif_days, category";
const INSERT_INTERVAL: &str = "INSERT INTO intervals (name, date, start_time, end_time, duration, is_dif_days, category)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_INTERVAL: &str = "UPDATE intervals
    SET name = ?2, date = ?3, start_time = ?4, end_time = ?5, duration = ?6, is_dif_days = ?7, category = ?8,
        updated_at = CURRENT_TIMESTAMP
    WHERE id = ?1";
const DELETE_INTERVAL: &str = "DELETE FROM intervals WHERE id = ?1";
const DELETE_TIMER_FOR_INTERVAL: &str = "DELETE FROM timer WHERE interval_id = ?1";
const RENAME_CATEGORY: &str = "UPDATE intervals SET category = ?2, updated_at = CURRENT_TIMESTAMP WHERE category = ?1";
const COUNT_BY_CATEGORY: &str = "SELECT COUNT(*) FROM intervals WHERE category = ?1";
const SELECT_LABELS: &str = "SELECT category FROM intervals WHERE category != '' GROUP BY category ORDER BY MIN(id)";
const ORDER: &str = "ORDER BY date, start_time, id";

pub struct Intervals<'a> {
    conn: &'a Connection,
}

fn from_row(row: &Row) -> rusqlite::Result<IntervalRecord> {
    Ok(IntervalRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        date: row.get(2)?,
        start_time: row.get(3)?,
        end_time: row.get(4)?,
        duration: row.get(5)?,
        is_dif_days: row.get(6)?,
        category: row.get(7)?,
    })
}

impl<'a> Intervals<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Records dated within `from..=to`, oldest first.
    pub fn list_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<IntervalRecord>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM intervals WHERE date BETWEEN ?1 AND ?2 {ORDER}");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![time_math::date_to_string(from), time_math::date_to_string(to)],
            from_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Moves every interval filed under `old` to `new`; returns how many moved.
    pub fn rename_category(&self, old: &str, new: &str) -> Result<usize, StoreError> {
        Ok(self.conn.execute(RENAME_CATEGORY, params![old, new])?)
    }

    /// The spelling under which intervals are filed as `name`, compared
    /// case-insensitively. Finds labels whose category record was deleted.
    pub fn find_label(&self, name: &str) -> Result<Option<String>, StoreError> {
        let key = category::name_key(name);
        let mut stmt = self.conn.prepare(SELECT_LABELS)?;
        let labels = stmt.query_map([], |row| row.get::<_, String>(0))?;
        for label in labels {
            let label = label?;
            if category::name_key(&label) == key {
                return Ok(Some(label));
            }
        }
        Ok(None)
    }

    pub fn count_by_category(&self, category: &str) -> Result<usize, StoreError> {
        let count: i64 = self.conn.query_row(COUNT_BY_CATEGORY, params![category], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl Store<IntervalRecord> for Intervals<'_> {
    fn list_all(&self) -> Result<Vec<IntervalRecord>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM intervals {ORDER}");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn get_by_id(&self, id: i64) -> Result<Option<IntervalRecord>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM intervals WHERE id = ?1");
        Ok(self.conn.query_row(&sql, params![id], from_row).optional()?)
    }

    /// Derives and validates before writing, so stored rows stay consistent.
    fn upsert(&self, record: IntervalRecord) -> Result<IntervalRecord, StoreError> {
        let mut record = interval::prepare(record)?;
        match record.id {
            None => {
                self.conn.execute(
                    INSERT_INTERVAL,
                    params![
                        record.name,
                        record.date,
                        record.start_time,
                        record.end_time,
                        record.duration,
                        record.is_dif_days,
                        record.category
                    ],
                )?;
                record.id = Some(self.conn.last_insert_rowid());
            }
            Some(id) => {
                let affected = self.conn.execute(
                    UPDATE_INTERVAL,
                    params![
                        id,
                        record.name,
                        record.date,
                        record.start_time,
                        record.end_time,
                        record.duration,
                        record.is_dif_days,
                        record.category
                    ],
                )?;
                if affected == 0 {
                    return Err(StoreError::NotFound(id));
                }
            }
        }
        Ok(record)
    }

    /// Also drops a timer session that pointed at the deleted interval.
    fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let affected = self.conn.execute(DELETE_INTERVAL, params![id])?;
        if affected > 0 {
            self.conn.execute(DELETE_TIMER_FOR_INTERVAL, params![id])?;
        }
        Ok(affected > 0)
    }
}
