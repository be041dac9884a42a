use crate::{
    commands::{category::resolve_category, parse_date_arg, report_store_error, today},
    db::{db::Db, store::Store, timer::start_timer},
    libs::{config::Config, interval::IntervalRecord, messages::Message, time_math},
    msg_error_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// What the time was spent on
    name: String,

    /// Start time (HH:MM:SS); defaults to now
    #[arg(short, long)]
    start: Option<String>,

    /// End time (HH:MM:SS); an end before the start means the next day
    #[arg(short, long)]
    end: Option<String>,

    /// Date (YYYY-MM-DD, today, yesterday)
    #[arg(short, long, default_value = "today")]
    date: String,

    #[arg(short, long, default_value = "")]
    category: String,

    /// Start the timer on the new interval right away
    #[arg(short, long)]
    timer: bool,
}

pub fn cmd(args: AddArgs) -> Result<()> {
    let label = Config::read()?.uncategorized_label();
    let db = Db::new()?;
    let now = Local::now();

    let date = parse_date_arg(&args.date, today())?;
    let start = match &args.start {
        Some(value) => time_math::parse_clock_time(value).map_err(|_| msg_error_anyhow!(Message::InvalidTime(value.clone())))?,
        None => now.time().into(),
    };
    let end = match &args.end {
        Some(value) => time_math::parse_clock_time(value).map_err(|_| msg_error_anyhow!(Message::InvalidTime(value.clone())))?,
        None => start,
    };

    let tx = db.conn.unchecked_transaction()?;
    let category = resolve_category(&db, &args.category, &label)?;
    let record = IntervalRecord::new(&args.name, date, start, end, &category);
    let saved = db.intervals().upsert(record).map_err(report_store_error)?;
    tx.commit()?;

    let id = saved.id.unwrap_or_default();
    msg_success!(Message::IntervalCreated(id, saved.name.clone()));

    if args.timer {
        let started = start_timer(&db, id, now).map_err(report_store_error)?;
        if let Some(previous) = started.stopped {
            msg_info!(Message::TimerSwitched(previous.name));
        }
        msg_success!(Message::TimerStarted(started.started.name));
    }
    Ok(())
}
