pub mod add;
pub mod category;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod migrations;
pub mod stats;
pub mod timer;

use crate::libs::error::StoreError;
use crate::libs::messages::Message;
use crate::libs::time_math;
use crate::{msg_bail_anyhow, msg_error, msg_error_anyhow};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure tally interactively")]
    Init(init::InitArgs),
    #[command(about = "Record a new interval")]
    Add(add::AddArgs),
    #[command(about = "List intervals in a date range")]
    List(list::ListArgs),
    #[command(about = "Change an interval")]
    Edit(edit::EditArgs),
    #[command(about = "Delete intervals by id")]
    Delete(delete::DeleteArgs),
    #[command(about = "Manage categories")]
    Category(category::CategoryArgs),
    #[command(about = "Start, stop or watch the running timer")]
    Timer(timer::TimerArgs),
    #[command(about = "Time per category and daily trends")]
    Stats(stats::StatsArgs),
    #[command(about = "Export intervals or statistics")]
    Export(export::ExportArgs),
    #[command(about = "Import intervals from a JSON export or a legacy backup")]
    Import(import::ImportArgs),
    #[command(about = "Inspect the database schema version")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Add(args) => add::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Edit(args) => edit::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::Category(args) => category::cmd(args),
            Commands::Timer(args) => timer::cmd(args).await,
            Commands::Stats(args) => stats::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Import(args) => import::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// Parses `today`, `yesterday` or a `YYYY-MM-DD` date.
pub fn parse_date_arg(value: &str, today: NaiveDate) -> Result<NaiveDate> {
    match value.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        other => time_math::string_to_date(other).map_err(|_| msg_error_anyhow!(Message::InvalidDate(value.to_string()))),
    }
}

/// Resolves optional `--from`/`--to` arguments.
///
/// A missing end is today. A missing start covers `default_days` days up to
/// the end. An inverted range is an error.
pub fn resolve_range(
    from: Option<&str>,
    to: Option<&str>,
    default_days: u32,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate)> {
    let to = match to {
        Some(value) => parse_date_arg(value, today)?,
        None => today,
    };
    let from = match from {
        Some(value) => parse_date_arg(value, today)?,
        None => to - Duration::days(i64::from(default_days.max(1)) - 1),
    };
    if from > to {
        msg_bail_anyhow!(Message::InvalidDateRange(
            time_math::date_to_string(from),
            time_math::date_to_string(to)
        ));
    }
    Ok((from, to))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Prints field-level validation errors, then turns the store error into a
/// command error.
pub fn report_store_error(error: StoreError) -> anyhow::Error {
    match error {
        StoreError::Invalid(errors) => {
            for e in &errors {
                msg_error!(Message::InvalidField(e.field().to_string(), e.to_string()));
            }
            msg_error_anyhow!(Message::RecordRejected)
        }
        StoreError::NotFound(id) => msg_error_anyhow!(Message::RecordNotFound(id)),
        StoreError::DuplicateCategory(name) => msg_error_anyhow!(Message::CategoryExists(name)),
        other => other.into(),
    }
}
