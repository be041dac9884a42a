use crate::{
    commands::{resolve_range, today},
    db::{db::Db, store::Store},
    libs::{aggregation, config::Config, messages::Message, time_math, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// First date (YYYY-MM-DD, today, yesterday)
    #[arg(short, long)]
    from: Option<String>,

    /// Last date; defaults to today
    #[arg(short, long)]
    to: Option<String>,

    /// Only this category; the uncategorized label selects intervals without one
    #[arg(short, long)]
    category: Option<String>,

    /// Every interval, ignoring the date range
    #[arg(short, long)]
    all: bool,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let config = Config::read()?;
    let label = config.uncategorized_label();
    let db = Db::new()?;

    let (from, to) = resolve_range(
        args.from.as_deref(),
        args.to.as_deref(),
        config.stats().default_range_days,
        today(),
    )?;
    let mut intervals = if args.all {
        db.intervals().list_all()?
    } else {
        db.intervals().list_range(from, to)?
    };
    if let Some(category) = &args.category {
        intervals.retain(|r| aggregation::matches_category(r, category, &label));
    }

    if intervals.is_empty() {
        msg_info!(Message::NoIntervalsFound);
        return Ok(());
    }

    if !args.all {
        msg_print!(
            Message::IntervalsHeader(time_math::date_to_string(from), time_math::date_to_string(to)),
            true
        );
    }
    let session = db.timer().current()?;
    View::intervals(&intervals, session.as_ref(), Local::now(), &label)?;
    Ok(())
}
