//! Versioned interval schemas and the migrations between them.
//!
//! Interval data has been stored in three shapes over time. Instead of
//! probing optional fields at every call site, imported data is classified
//! once with [`detect_version`] and lifted to the current shape by explicit
//! migration steps:
//!
//! | Version | Shape |
//! |---------|-------|
//! | V0 | `{id, name, startTime, endTime, description?, createdAt, updatedAt?}` with ISO datetimes for the times and no date or category |
//! | V1 | `{id, name, date, startTime, endTime, duration, isDifDays, category}` with `date` as an ISO datetime |
//! | V2 | as V1, with `date` as `YYYY-MM-DD` (current, [`IntervalRecord`]) |
//!
//! Every migrated record is passed through [`interval::prepare`], so its
//! derived fields are recomputed rather than trusted.

use crate::libs::category::CategoryRecord;
use crate::libs::error::{Field, FormatError, ValidationError};
use crate::libs::interval::{self, IntervalRecord};
use crate::libs::time_math::{self, ClockTime};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CURRENT_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaVersion {
    V0,
    V1,
    V2,
}

/// Legacy record: times are full timestamps, no date or category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalV0 {
    #[serde(default)]
    pub id: Option<Value>,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Record whose `date` is a serialized timestamp rather than a calendar date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalV1 {
    #[serde(default)]
    pub id: Option<Value>,
    pub name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub is_dif_days: bool,
    #[serde(default)]
    pub category: String,
}

/// The JSON export/import document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    pub exported_at: String,
    pub intervals: Vec<IntervalRecord>,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
}

impl Snapshot {
    pub fn new(intervals: Vec<IntervalRecord>, categories: Vec<CategoryRecord>) -> Self {
        Snapshot {
            version: CURRENT_VERSION,
            exported_at: Local::now().to_rfc3339(),
            intervals,
            categories,
        }
    }
}

/// A record that could not be brought to the current schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub index: usize,
    pub name: Option<String>,
    pub errors: Vec<ValidationError>,
}

/// Result of lifting a batch of raw records.
#[derive(Debug, Clone, Default)]
pub struct Upgrade {
    pub records: Vec<IntervalRecord>,
    pub rejected: Vec<Rejected>,
}

/// Classifies one raw record by the fields it carries.
pub fn detect_version(value: &Value) -> Option<SchemaVersion> {
    let object = value.as_object()?;
    let date = match object.get("date") {
        Some(Value::String(date)) => date,
        Some(_) => return None,
        None => {
            return (object.contains_key("startTime") && object.contains_key("endTime")).then_some(SchemaVersion::V0);
        }
    };
    if time_math::string_to_date(date).is_ok() {
        Some(SchemaVersion::V2)
    } else {
        Some(SchemaVersion::V1)
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Local>, FormatError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| FormatError::Timestamp(value.to_string()))
}

fn format_error(field: Field, source: FormatError) -> Vec<ValidationError> {
    vec![ValidationError::Format { field, source }]
}

/// V0 to V1: split the start/end timestamps into an anchor date and clock times.
///
/// The anchor date is the local date of the start timestamp. The free-text
/// `description` has no counterpart and is dropped; the category starts empty.
pub fn migrate_v0_to_v1(old: IntervalV0) -> Result<IntervalV1, Vec<ValidationError>> {
    let start = parse_timestamp(&old.start_time).map_err(|e| format_error(Field::StartTime, e))?;
    let end = parse_timestamp(&old.end_time).map_err(|e| format_error(Field::EndTime, e))?;
    let (duration, is_dif_days) = time_math::compute_duration(ClockTime::from(start.time()), ClockTime::from(end.time()));

    Ok(IntervalV1 {
        id: old.id,
        name: old.name,
        date: start.to_rfc3339(),
        start_time: ClockTime::from(start.time()).to_string(),
        end_time: ClockTime::from(end.time()).to_string(),
        duration: duration.to_string(),
        is_dif_days,
        category: String::new(),
    })
}

/// V1 to V2: reduce the timestamp `date` to its local calendar date.
pub fn migrate_v1_to_v2(old: IntervalV1) -> Result<IntervalRecord, Vec<ValidationError>> {
    let date: NaiveDate = match time_math::string_to_date(&old.date) {
        Ok(date) => date,
        Err(_) => parse_timestamp(&old.date).map_err(|e| format_error(Field::Date, e))?.date_naive(),
    };

    interval::prepare(IntervalRecord {
        id: None,
        name: old.name,
        date: time_math::date_to_string(date),
        start_time: old.start_time,
        end_time: old.end_time,
        duration: old.duration,
        is_dif_days: old.is_dif_days,
        category: old.category,
    })
}

fn upgrade_one(value: Value) -> Result<IntervalRecord, Vec<ValidationError>> {
    let shape_error = |e: serde_json::Error| format_error(Field::Name, FormatError::Shape(e.to_string()));
    match detect_version(&value) {
        Some(SchemaVersion::V0) => {
            let v0: IntervalV0 = serde_json::from_value(value).map_err(shape_error)?;
            migrate_v1_to_v2(migrate_v0_to_v1(v0)?)
        }
        Some(SchemaVersion::V1) => {
            let v1: IntervalV1 = serde_json::from_value(value).map_err(shape_error)?;
            migrate_v1_to_v2(v1)
        }
        Some(SchemaVersion::V2) => {
            let mut current: IntervalRecord = serde_json::from_value(value).map_err(shape_error)?;
            current.id = None;
            interval::prepare(current)
        }
        None => Err(format_error(Field::Name, FormatError::Shape(value.to_string()))),
    }
}

/// Lifts raw records of any known version to the current schema.
///
/// Ids are not carried over; the store assigns fresh ones on insert.
pub fn upgrade_records(values: Vec<Value>) -> Upgrade {
    let mut upgrade = Upgrade::default();
    for (index, value) in values.into_iter().enumerate() {
        let name = value.get("name").and_then(Value::as_str).map(str::to_string);
        match upgrade_one(value) {
            Ok(record) => upgrade.records.push(record),
            Err(errors) => upgrade.rejected.push(Rejected { index, name, errors }),
        }
    }
    upgrade
}

/// Reads an import document: a [`Snapshot`], or a bare array of records of
/// any version.
pub fn read_document(json: &str) -> serde_json::Result<(Upgrade, Vec<CategoryRecord>)> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(items) => Ok((upgrade_records(items), Vec::new())),
        Value::Object(mut object) => {
            let intervals = match object.remove("intervals") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            };
            let categories = match object.remove("categories") {
                Some(categories) => serde_json::from_value::<Vec<CategoryRecord>>(categories)?
                    .into_iter()
                    .map(|c| CategoryRecord::new(&c.name))
                    .collect(),
                None => Vec::new(),
            };
            Ok((upgrade_records(intervals), categories))
        }
        _ => Ok((Upgrade::default(), Vec::new())),
    }
}
