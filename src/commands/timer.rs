use crate::{
    commands::report_store_error,
    db::{
        db::Db,
        store::Store,
        timer::{start_timer, stop_timer},
    },
    libs::{error::StoreError, messages::Message, time_math},
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use std::io::Write;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct TimerArgs {
    #[command(subcommand)]
    command: TimerCommand,
}

#[derive(Debug, Subcommand)]
enum TimerCommand {
    /// Start timing an interval; a running timer is stopped first
    Start { id: i64 },
    /// Stop the running timer
    Stop,
    /// Show the running timer
    Status {
        /// Refresh every second until Ctrl-C
        #[arg(short, long)]
        follow: bool,
    },
}

pub async fn cmd(args: TimerArgs) -> Result<()> {
    match args.command {
        TimerCommand::Start { id } => handle_start(id),
        TimerCommand::Stop => handle_stop(),
        TimerCommand::Status { follow } => handle_status(follow).await,
    }
}

fn handle_start(id: i64) -> Result<()> {
    let db = Db::new()?;
    let started = start_timer(&db, id, Local::now()).map_err(report_store_error)?;
    if started.already_running {
        msg_info!(Message::TimerAlreadyRunning(started.started.name));
        return Ok(());
    }
    if let Some(previous) = started.stopped {
        msg_info!(Message::TimerSwitched(previous.name));
    }
    msg_success!(Message::TimerStarted(started.started.name));
    Ok(())
}

fn handle_stop() -> Result<()> {
    let db = Db::new()?;
    match stop_timer(&db, Local::now()) {
        Ok(Some(record)) => msg_success!(Message::TimerStopped(record.name, record.duration)),
        Ok(None) => msg_info!(Message::NoTimerRunning),
        Err(StoreError::NotFound(id)) => msg_warning!(Message::TimerIntervalMissing(id)),
        Err(e) => return Err(report_store_error(e)),
    }
    Ok(())
}

async fn handle_status(follow: bool) -> Result<()> {
    let db = Db::new()?;
    let Some(session) = db.timer().current()? else {
        msg_info!(Message::NoTimerRunning);
        return Ok(());
    };
    let Some(record) = db.intervals().get_by_id(session.interval_id)? else {
        db.timer().clear()?;
        msg_warning!(Message::TimerIntervalMissing(session.interval_id));
        return Ok(());
    };

    let status = |now| Message::TimerRunning(record.name.clone(), time_math::format_duration(session.elapsed(now)));

    if !follow {
        msg_print!(status(Local::now()));
        return Ok(());
    }

    msg_info!(Message::TimerFollowHint);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut stdout = std::io::stdout();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                write!(stdout, "\r{}", status(Local::now()))?;
                stdout.flush()?;
            }
            _ = &mut ctrl_c => {
                writeln!(stdout)?;
                break;
            }
        }
    }
    Ok(())
}
