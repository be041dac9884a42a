//! The tracked interval record and its derivation/validation rules.
//!
//! `duration` and `is_dif_days` are derived from `start_time`/`end_time` and
//! are never set independently. Every create and every update that touches
//! the start or end time goes through [`derive_fields`] before the record is
//! validated and persisted; [`prepare`] runs both steps.

use crate::libs::error::{Field, ValidationError};
use crate::libs::time_math::{self, ClockTime};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const NAME_MAX_CHARS: usize = 100;
pub const CATEGORY_MAX_CHARS: usize = 40;

/// One tracked activity occurrence, in its persisted string shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub is_dif_days: bool,
    /// Empty means uncategorized.
    #[serde(default)]
    pub category: String,
}

impl IntervalRecord {
    /// Creates an unsaved record with its derived fields already computed.
    pub fn new(name: &str, date: NaiveDate, start: ClockTime, end: ClockTime, category: &str) -> Self {
        let (duration, is_dif_days) = time_math::compute_duration(start, end);
        IntervalRecord {
            id: None,
            name: name.trim().to_string(),
            date: time_math::date_to_string(date),
            start_time: start.to_string(),
            end_time: end.to_string(),
            duration: duration.to_string(),
            is_dif_days,
            category: category.trim().to_string(),
        }
    }

    /// Replaces both clock times and recomputes the derived fields.
    pub fn set_times(&mut self, start: ClockTime, end: ClockTime) {
        self.start_time = start.to_string();
        self.end_time = end.to_string();
        let (duration, is_dif_days) = time_math::compute_duration(start, end);
        self.duration = duration.to_string();
        self.is_dif_days = is_dif_days;
    }

    pub fn set_start_time(&mut self, start: ClockTime) -> Result<(), ValidationError> {
        let end = parse_time(Field::EndTime, &self.end_time)?;
        self.set_times(start, end);
        Ok(())
    }

    pub fn set_end_time(&mut self, end: ClockTime) -> Result<(), ValidationError> {
        let start = parse_time(Field::StartTime, &self.start_time)?;
        self.set_times(start, end);
        Ok(())
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category.is_empty()
    }
}

/// A partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct IntervalPatch {
    pub name: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub category: Option<String>,
}

impl IntervalPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.category.is_none()
    }

    /// Merges the patch into `record` and re-derives when a time changed.
    pub fn apply(self, mut record: IntervalRecord) -> Result<IntervalRecord, Vec<ValidationError>> {
        let touches_times = self.start_time.is_some() || self.end_time.is_some();
        if let Some(name) = self.name {
            record.name = name.trim().to_string();
        }
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(start) = self.start_time {
            record.start_time = start;
        }
        if let Some(end) = self.end_time {
            record.end_time = end;
        }
        if let Some(category) = self.category {
            record.category = category.trim().to_string();
        }
        if touches_times {
            prepare(record)
        } else {
            validate(record)
        }
    }
}

fn parse_time(field: Field, value: &str) -> Result<ClockTime, ValidationError> {
    time_math::parse_clock_time(value).map_err(|source| ValidationError::Format { field, source })
}

/// Recomputes `duration` and `is_dif_days` from the start and end times.
///
/// Start and end are rewritten in canonical `HH:MM:SS` form. Fails with the
/// field errors of whichever times do not parse.
pub fn derive_fields(mut record: IntervalRecord) -> Result<IntervalRecord, Vec<ValidationError>> {
    let start = parse_time(Field::StartTime, &record.start_time);
    let end = parse_time(Field::EndTime, &record.end_time);
    match (start, end) {
        (Ok(start), Ok(end)) => {
            record.set_times(start, end);
            Ok(record)
        }
        (start, end) => Err([start.err(), end.err()].into_iter().flatten().collect()),
    }
}

fn check_length(field: Field, value: &str, max: usize, errors: &mut Vec<ValidationError>) {
    let actual = value.chars().count();
    if actual > max {
        errors.push(ValidationError::TooLong { field, max, actual });
    }
}

/// Checks every field and returns all violations, not just the first.
pub fn validate(record: IntervalRecord) -> Result<IntervalRecord, Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_length(Field::Name, &record.name, NAME_MAX_CHARS, &mut errors);
    check_length(Field::Category, &record.category, CATEGORY_MAX_CHARS, &mut errors);

    if let Err(source) = time_math::string_to_date(&record.date) {
        errors.push(ValidationError::Format { field: Field::Date, source });
    }

    let start = parse_time(Field::StartTime, &record.start_time).map_err(|e| errors.push(e)).ok();
    let end = parse_time(Field::EndTime, &record.end_time).map_err(|e| errors.push(e)).ok();
    let duration = parse_time(Field::Duration, &record.duration).map_err(|e| errors.push(e)).ok();

    if let (Some(start), Some(end), Some(duration)) = (start, end, duration) {
        let (expected, crossed) = time_math::compute_duration(start, end);
        if expected != duration {
            errors.push(ValidationError::StaleDuration {
                expected: expected.to_string(),
                actual: record.duration.clone(),
            });
        }
        if crossed != record.is_dif_days {
            errors.push(ValidationError::StaleRollover {
                expected: crossed,
                actual: record.is_dif_days,
            });
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err(errors)
    }
}

/// Derives then validates; the gate every write goes through.
///
/// When the times do not parse, the remaining fields are still checked so
/// the caller sees every problem in one pass.
pub fn prepare(record: IntervalRecord) -> Result<IntervalRecord, Vec<ValidationError>> {
    match derive_fields(record.clone()) {
        Ok(derived) => validate(derived),
        Err(mut time_errors) => {
            if let Err(other) = validate(record) {
                for e in other {
                    if !time_errors.contains(&e) && !matches!(e.field(), Field::Duration | Field::IsDifDays) {
                        time_errors.push(e);
                    }
                }
            }
            Err(time_errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::error::FormatError;

    fn record(start: &str, end: &str) -> IntervalRecord {
        IntervalRecord {
            id: Some(1),
            name: "Reading".into(),
            date: "2024-01-02".into(),
            start_time: start.into(),
            end_time: end.into(),
            duration: "00:00:00".into(),
            is_dif_days: false,
            category: "Study".into(),
        }
    }

    #[test]
    fn derive_recomputes_stale_fields() {
        let derived = derive_fields(record("23:30:00", "0:15:00")).unwrap();
        assert_eq!(derived.duration, "00:45:00");
        assert!(derived.is_dif_days);
        assert_eq!(derived.end_time, "00:15:00");
    }

    #[test]
    fn validate_flags_stale_duration() {
        let errors = validate(record("09:00:00", "10:00:00")).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::StaleDuration { expected: "01:00:00".into(), actual: "00:00:00".into() }]
        );
    }

    #[test]
    fn validate_reports_every_violation() {
        let mut bad = record("25:00:00", "10:00:00");
        bad.name = "x".repeat(101);
        bad.category = "c".repeat(41);
        bad.date = "02.01.2024".into();
        bad.duration = "nope".into();

        let fields: Vec<Field> = validate(bad).unwrap_err().iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec![Field::Name, Field::Category, Field::Date, Field::StartTime, Field::Duration]);
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        let mut r = derive_fields(record("09:00:00", "10:00:00")).unwrap();
        r.category = "é".repeat(CATEGORY_MAX_CHARS);
        assert!(validate(r).is_ok());
    }

    #[test]
    fn prepare_collects_time_and_other_errors() {
        let mut bad = record("9:00", "10:00:00");
        bad.name = "n".repeat(120);
        let errors = prepare(bad).unwrap_err();
        assert!(errors.contains(&ValidationError::Format {
            field: Field::StartTime,
            source: FormatError::Shape("9:00".into()),
        }));
        assert!(errors.iter().any(|e| e.field() == Field::Name));
    }

    #[test]
    fn patch_touching_end_time_rederives() {
        let saved = prepare(record("09:00:00", "10:00:00")).unwrap();
        let patch = IntervalPatch { end_time: Some("08:00:00".into()), ..Default::default() };
        let updated = patch.apply(saved).unwrap();
        assert_eq!(updated.duration, "23:00:00");
        assert!(updated.is_dif_days);
    }

    #[test]
    fn patch_without_times_keeps_duration() {
        let saved = prepare(record("09:00:00", "10:30:00")).unwrap();
        let patch = IntervalPatch { category: Some("  Work ".into()), ..Default::default() };
        let updated = patch.apply(saved).unwrap();
        assert_eq!(updated.category, "Work");
        assert_eq!(updated.duration, "01:30:00");
    }

    #[test]
    fn setters_keep_derived_fields_consistent() {
        let mut r = IntervalRecord::new(
            "Focus",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            "10:00:00".parse().unwrap(),
            "10:00:00".parse().unwrap(),
            "",
        );
        assert_eq!(r.duration, "00:00:00");
        r.set_end_time("12:15:30".parse().unwrap()).unwrap();
        assert_eq!(r.duration, "02:15:30");
        r.set_start_time("13:00:00".parse().unwrap()).unwrap();
        assert!(r.is_dif_days);
        assert!(validate(r).is_ok());
    }
}
