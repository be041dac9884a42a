//! Aggregation of interval records into per-category and per-day totals.
//!
//! Aggregation trusts the persisted `duration` field: each record's seconds
//! come from parsing that string, not from re-running the start/end
//! computation. A record whose duration does not parse is skipped and
//! reported as an [`AggregationWarning`]; the rest of the set is still
//! aggregated.
//!
//! ## Ordering
//!
//! Category buckets come out in first-seen order of their key in the input,
//! which keeps chart legends stable across renders. Per-day totals are
//! ordered by date ascending.
//!
//! ## Examples
//!
//! ```rust
//! use tally::libs::aggregation::{aggregate_by_category, total_duration};
//! # use tally::libs::interval::IntervalRecord;
//! # fn rec(category: &str, duration: &str) -> IntervalRecord {
//! #     IntervalRecord { id: None, name: String::new(), date: "2024-01-01".into(),
//! #         start_time: "00:00:00".into(), end_time: "00:00:00".into(),
//! #         duration: duration.into(), is_dif_days: false, category: category.into() }
//! # }
//! let records = vec![rec("Work", "01:30:00"), rec("Work", "00:45:00"), rec("", "00:10:00")];
//! let report = aggregate_by_category(&records);
//! assert_eq!(report.value[0].key, "Work");
//! assert_eq!(report.value[0].formatted_time, "02:15:00");
//! assert_eq!(total_duration(&report.value), "02:25:00");
//! ```

use crate::libs::error::AggregationWarning;
use crate::libs::interval::IntervalRecord;
use crate::libs::time_math::{self, duration_to_seconds};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::warn;

/// Summed duration of one group of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationBucket {
    /// Category name; empty for uncategorized records.
    pub key: String,
    pub total_seconds: u64,
    pub formatted_time: String,
    /// Number of records counted into this bucket.
    pub intervals: usize,
}

impl AggregationBucket {
    fn new(key: String) -> Self {
        AggregationBucket {
            key,
            total_seconds: 0,
            formatted_time: time_math::format_duration(0),
            intervals: 0,
        }
    }

    fn add(&mut self, seconds: u64) {
        self.total_seconds += seconds;
        self.intervals += 1;
        self.formatted_time = time_math::format_duration(self.total_seconds);
    }
}

/// An aggregation result together with the records it had to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregated<T> {
    pub value: T,
    pub warnings: Vec<AggregationWarning>,
}

impl<T> Aggregated<T> {
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

fn record_seconds(record: &IntervalRecord, warnings: &mut Vec<AggregationWarning>) -> Option<u64> {
    match duration_to_seconds(&record.duration) {
        Ok(seconds) => Some(seconds),
        Err(source) => {
            let warning = AggregationWarning {
                id: record.id,
                name: record.name.clone(),
                source,
            };
            warn!("{}", warning);
            warnings.push(warning);
            None
        }
    }
}

/// Keeps records whose date lies in `start..=end`.
///
/// Compares the canonical `YYYY-MM-DD` strings, which order the same way as
/// the dates they encode. An inverted range yields nothing.
pub fn filter_by_date_range(records: &[IntervalRecord], start: NaiveDate, end: NaiveDate) -> Vec<IntervalRecord> {
    if start > end {
        return Vec::new();
    }
    let start = time_math::date_to_string(start);
    let end = time_math::date_to_string(end);
    records
        .iter()
        .filter(|r| r.date.as_str() >= start.as_str() && r.date.as_str() <= end.as_str())
        .cloned()
        .collect()
}

/// Sums durations per category in first-seen order.
pub fn aggregate_by_category(records: &[IntervalRecord]) -> Aggregated<Vec<AggregationBucket>> {
    let mut buckets: Vec<AggregationBucket> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut warnings = Vec::new();

    for record in records {
        let Some(seconds) = record_seconds(record, &mut warnings) else {
            continue;
        };
        let slot = *index.entry(record.category.as_str()).or_insert_with(|| {
            buckets.push(AggregationBucket::new(record.category.clone()));
            buckets.len() - 1
        });
        buckets[slot].add(seconds);
    }

    Aggregated { value: buckets, warnings }
}

/// Whether `record` belongs to `category`.
///
/// Besides an exact match, the `uncategorized_label` selects records with an
/// empty category.
pub fn matches_category(record: &IntervalRecord, category: &str, uncategorized_label: &str) -> bool {
    record.category == category || (category == uncategorized_label && record.category.is_empty())
}

/// Per-day totals for one category, ordered by date ascending.
pub fn aggregate_by_category_and_date(
    records: &[IntervalRecord],
    category: &str,
    uncategorized_label: &str,
) -> Aggregated<BTreeMap<String, u64>> {
    let mut days = BTreeMap::new();
    let mut warnings = Vec::new();

    for record in records.iter().filter(|r| matches_category(r, category, uncategorized_label)) {
        if let Some(seconds) = record_seconds(record, &mut warnings) {
            *days.entry(record.date.clone()).or_insert(0) += seconds;
        }
    }

    Aggregated { value: days, warnings }
}

/// Sum of all bucket totals as an `HH:MM:SS` string.
pub fn total_duration(buckets: &[AggregationBucket]) -> String {
    time_math::format_duration(total_seconds(buckets))
}

pub fn total_seconds(buckets: &[AggregationBucket]) -> u64 {
    buckets.iter().map(|b| b.total_seconds).sum()
}

/// Keeps buckets whose key is selected; an empty selection keeps everything.
///
/// The empty key is matched through `uncategorized_label`, the name a user
/// sees and picks for it.
pub fn select_categories(
    buckets: Vec<AggregationBucket>,
    selected: &HashSet<String>,
    uncategorized_label: &str,
) -> Vec<AggregationBucket> {
    if selected.is_empty() {
        return buckets;
    }
    buckets
        .into_iter()
        .filter(|b| {
            let shown = if b.key.is_empty() { uncategorized_label } else { b.key.as_str() };
            selected.contains(shown)
        })
        .collect()
}
