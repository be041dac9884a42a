use crate::{
    commands::{category::resolve_category, parse_date_arg, report_store_error, today},
    db::{db::Db, store::Store},
    libs::{
        config::Config,
        interval::{IntervalPatch, IntervalRecord},
        messages::Message,
        time_math,
    },
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct EditArgs {
    id: i64,

    #[arg(short, long)]
    name: Option<String>,

    /// YYYY-MM-DD, today, yesterday
    #[arg(short, long)]
    date: Option<String>,

    #[arg(short, long)]
    start: Option<String>,

    #[arg(short, long)]
    end: Option<String>,

    /// New category; an empty string removes it
    #[arg(short, long)]
    category: Option<String>,
}

impl EditArgs {
    fn patch(&self) -> Result<IntervalPatch> {
        let date = match &self.date {
            Some(value) => Some(time_math::date_to_string(parse_date_arg(value, today())?)),
            None => None,
        };
        Ok(IntervalPatch {
            name: self.name.clone(),
            date,
            start_time: self.start.clone(),
            end_time: self.end.clone(),
            category: self.category.clone(),
        })
    }
}

/// Prompts for every field, keeping unchanged values out of the patch.
fn prompt_patch(record: &IntervalRecord) -> Result<IntervalPatch> {
    let ask = |prompt: &str, current: &str, allow_empty: bool| -> Result<Option<String>> {
        let value: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(current.to_string())
            .allow_empty(allow_empty)
            .interact_text()?;
        Ok((value != current).then_some(value))
    };

    Ok(IntervalPatch {
        name: ask("Name", &record.name, false)?,
        date: ask("Date", &record.date, false)?,
        start_time: ask("Start", &record.start_time, false)?,
        end_time: ask("End", &record.end_time, false)?,
        category: ask("Category", &record.category, true)?,
    })
}

pub fn cmd(args: EditArgs) -> Result<()> {
    let label = Config::read()?.uncategorized_label();
    let db = Db::new()?;
    let intervals = db.intervals();

    let Some(record) = intervals.get_by_id(args.id)? else {
        msg_bail_anyhow!(Message::IntervalNotFound(args.id));
    };

    let mut patch = args.patch()?;
    if patch.is_empty() {
        patch = prompt_patch(&record)?;
    }
    if patch.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let tx = db.conn.unchecked_transaction()?;
    if let Some(category) = patch.category.take() {
        patch.category = Some(resolve_category(&db, &category, &label)?);
    }
    let updated = patch.apply(record).map_err(|errors| report_store_error(errors.into()))?;
    intervals.upsert(updated).map_err(report_store_error)?;
    tx.commit()?;

    msg_success!(Message::IntervalUpdated(args.id));
    Ok(())
}
