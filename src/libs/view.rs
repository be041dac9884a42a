//! Terminal tables for intervals, categories and statistics.

use crate::libs::aggregation::AggregationBucket;
use crate::libs::category::CategoryRecord;
use crate::libs::colors;
use crate::libs::interval::IntervalRecord;
use crate::libs::time_math;
use crate::libs::timer::{self, TimerSession};
use anyhow::Result;
use chrono::{DateTime, Local};
use prettytable::{format, row, Table};
use std::collections::BTreeMap;

/// `HH:MM` when the seconds are zero, the stored string otherwise.
pub fn short_time(time: &str) -> String {
    match time.rsplit_once(':') {
        Some((head, "00")) if head.contains(':') => head.to_string(),
        _ => time.to_string(),
    }
}

/// What to show for a category key; the empty key gets `uncategorized_label`.
pub fn category_label<'a>(key: &'a str, uncategorized_label: &'a str) -> &'a str {
    if key.is_empty() {
        uncategorized_label
    } else {
        key
    }
}

pub struct View {}

impl View {
    /// Builds the interval table. `session` marks the running interval.
    pub fn intervals_table(
        intervals: &[IntervalRecord],
        session: Option<&TimerSession>,
        now: DateTime<Local>,
        uncategorized_label: &str,
    ) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.set_titles(row!["ID", "DATE", "NAME", "START", "END", "DURATION", "CATEGORY"]);

        for interval in intervals {
            let running = session.is_some_and(|s| s.is_for(interval));
            let mut end = short_time(&interval.end_time);
            if running {
                end = "…".to_string();
            } else if interval.is_dif_days {
                end.push_str(" +1");
            }
            table.add_row(row![
                interval.id.unwrap_or(0),
                interval.date,
                interval.name,
                short_time(&interval.start_time),
                end,
                r->timer::display_duration(interval, session, now),
                category_label(&interval.category, uncategorized_label)
            ]);
        }
        table
    }

    pub fn intervals(
        intervals: &[IntervalRecord],
        session: Option<&TimerSession>,
        now: DateTime<Local>,
        uncategorized_label: &str,
    ) -> Result<()> {
        Self::intervals_table(intervals, session, now, uncategorized_label).printstd();
        Ok(())
    }

    /// Categories with the number of intervals filed under each.
    pub fn categories(categories: &[(CategoryRecord, usize)]) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.set_titles(row!["ID", "NAME", "INTERVALS"]);
        for (category, used) in categories {
            table.add_row(row![category.id.unwrap_or(0), category.name, r->used]);
        }
        table.printstd();
        Ok(())
    }

    /// Per-category totals with their chart colors and a total row.
    pub fn buckets_table(buckets: &[AggregationBucket], uncategorized_label: &str) -> Table {
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        let palette = colors::assign_colors(&keys);
        let total_seconds: u64 = buckets.iter().map(|b| b.total_seconds).sum();
        let total_intervals: usize = buckets.iter().map(|b| b.intervals).sum();

        let mut table = Table::new();
        table.set_titles(row!["CATEGORY", "COLOR", "INTERVALS", "TIME", "SHARE"]);
        for bucket in buckets {
            let share = if total_seconds > 0 {
                bucket.total_seconds as f64 * 100.0 / total_seconds as f64
            } else {
                0.0
            };
            table.add_row(row![
                category_label(&bucket.key, uncategorized_label),
                palette.get(&bucket.key).copied().unwrap_or(colors::PALETTE[0]),
                r->bucket.intervals,
                r->bucket.formatted_time,
                r->format!("{:.1}%", share)
            ]);
        }
        table.add_row(row![
            b->"TOTAL",
            "",
            r->total_intervals,
            rb->time_math::format_duration(total_seconds),
            r->"100.0%"
        ]);
        table
    }

    pub fn buckets(buckets: &[AggregationBucket], uncategorized_label: &str) -> Result<()> {
        Self::buckets_table(buckets, uncategorized_label).printstd();
        Ok(())
    }

    /// One row per day with a proportional bar.
    pub fn trend_table(days: &BTreeMap<String, u64>) -> Table {
        const BAR_WIDTH: u64 = 30;
        let max = days.values().copied().max().unwrap_or(0);

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        for (date, seconds) in days {
            let filled = if max > 0 { (seconds * BAR_WIDTH).div_ceil(max) } else { 0 };
            table.add_row(row![
                date,
                r->time_math::format_duration(*seconds),
                "█".repeat(filled as usize)
            ]);
        }
        table
    }

    pub fn trend(days: &BTreeMap<String, u64>) -> Result<()> {
        Self::trend_table(days).printstd();
        Ok(())
    }
}
