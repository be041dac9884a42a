use crate::{
    commands::{resolve_range, today},
    db::db::Db,
    libs::{
        aggregation,
        config::Config,
        error::AggregationWarning,
        interval::IntervalRecord,
        messages::Message,
        time_math,
        view::View,
    },
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::collections::HashSet;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// First date (YYYY-MM-DD, today, yesterday)
    #[arg(short, long)]
    from: Option<String>,

    /// Last date; defaults to today
    #[arg(short, long)]
    to: Option<String>,

    /// Show the daily trend of one category instead of the per-category totals
    #[arg(short, long)]
    category: Option<String>,

    /// Limit the totals to these categories (repeatable)
    #[arg(long)]
    only: Vec<String>,
}

fn report_skipped(warnings: &[AggregationWarning]) {
    if warnings.is_empty() {
        return;
    }
    msg_warning!(Message::RecordsSkipped(warnings.len()));
    for warning in warnings {
        msg_info!(Message::RecordSkipped(warning.to_string()));
    }
}

/// Records of `category` that contributed to its trend.
fn trend_intervals(
    records: &[IntervalRecord],
    category: &str,
    uncategorized_label: &str,
    skipped: &[AggregationWarning],
) -> usize {
    let matched = records
        .iter()
        .filter(|r| aggregation::matches_category(r, category, uncategorized_label))
        .count();
    matched.saturating_sub(skipped.len())
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let config = Config::read()?;
    let label = config.uncategorized_label();
    let (from, to) = resolve_range(
        args.from.as_deref(),
        args.to.as_deref(),
        config.stats().default_range_days,
        today(),
    )?;

    let db = Db::new()?;
    let records = db.intervals().list_range(from, to)?;
    let records = aggregation::filter_by_date_range(&records, from, to);
    let (from, to) = (time_math::date_to_string(from), time_math::date_to_string(to));

    if let Some(category) = &args.category {
        let trend = aggregation::aggregate_by_category_and_date(&records, category, &label);
        report_skipped(&trend.warnings);
        if trend.value.is_empty() {
            msg_info!(Message::NoDataForPeriod);
            return Ok(());
        }
        msg_print!(Message::TrendHeader(category.clone()), true);
        View::trend(&trend.value)?;
        let total: u64 = trend.value.values().sum();
        let count = trend_intervals(&records, category, &label, &trend.warnings);
        msg_print!(Message::StatsTotal(time_math::format_duration(total), count), true);
        return Ok(());
    }

    let report = aggregation::aggregate_by_category(&records);
    report_skipped(&report.warnings);

    let selected: HashSet<String> = args.only.into_iter().collect();
    let buckets = aggregation::select_categories(report.value, &selected, &label);
    if buckets.is_empty() {
        msg_info!(Message::NoDataForPeriod);
        return Ok(());
    }

    msg_print!(Message::StatsHeader(from, to), true);
    View::buckets(&buckets, &label)?;
    let count = buckets.iter().map(|b| b.intervals).sum();
    msg_print!(Message::StatsTotal(aggregation::total_duration(&buckets), count), true);
    Ok(())
}
