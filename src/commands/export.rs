use crate::{
    commands::{parse_date_arg, today},
    db::{db::Db, store::Store},
    libs::{
        aggregation,
        config::Config,
        export::{ExportBundle, ExportData, ExportFormat, Exporter, StatsExport},
        messages::Message,
        schema::Snapshot,
        time_math,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(value_enum, default_value = "intervals")]
    data: ExportData,

    #[arg(short, long, value_enum, default_value = "json")]
    format: ExportFormat,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// First date; without --from and --to everything is exported
    #[arg(long)]
    from: Option<String>,

    #[arg(long)]
    to: Option<String>,
}

pub fn cmd(args: ExportArgs) -> Result<()> {
    let label = Config::read()?.uncategorized_label();
    let db = Db::new()?;
    let today = today();

    let mut intervals = db.intervals().list_all()?;
    let first = intervals
        .first()
        .and_then(|r| time_math::string_to_date(&r.date).ok())
        .unwrap_or(today);
    let last = intervals
        .last()
        .and_then(|r| time_math::string_to_date(&r.date).ok())
        .unwrap_or(today);
    let from = match &args.from {
        Some(value) => parse_date_arg(value, today)?,
        None => first,
    };
    let to = match &args.to {
        Some(value) => parse_date_arg(value, today)?,
        None => last.max(from),
    };
    if args.from.is_some() || args.to.is_some() {
        intervals = aggregation::filter_by_date_range(&intervals, from, to);
    }

    let buckets = aggregation::aggregate_by_category(&intervals).value;
    let bundle = ExportBundle {
        stats: StatsExport::new(from, to, &buckets, &label),
        snapshot: Snapshot::new(intervals, db.categories().list_all()?),
    };

    msg_info!(Message::ExportingData(format!("{:?}", args.format).to_lowercase()));
    let exporter = Exporter::new(args.format, args.output);
    for path in exporter.export(args.data, &bundle)? {
        msg_success!(Message::ExportCompleted(path.display().to_string()));
    }
    Ok(())
}
