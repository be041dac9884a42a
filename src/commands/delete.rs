use crate::{
    db::{db::Db, store::Store},
    libs::messages::Message,
    msg_bail_anyhow, msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Interval ids
    ids: Vec<i64>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(args: DeleteArgs) -> Result<()> {
    if args.ids.is_empty() {
        msg_bail_anyhow!(Message::NoIntervalIdsProvided);
    }

    let db = Db::new()?;
    let intervals = db.intervals();

    let mut found = Vec::new();
    let mut missing = Vec::new();
    for id in args.ids {
        match intervals.get_by_id(id)? {
            Some(_) => found.push(id),
            None => missing.push(id),
        }
    }
    if !missing.is_empty() {
        msg_warning!(Message::IntervalsNotFoundForIds(missing));
    }
    if found.is_empty() {
        return Ok(());
    }

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteIntervals(found.len()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let tx = db.conn.unchecked_transaction()?;
    let mut deleted = 0;
    for id in found {
        if intervals.delete_by_id(id)? {
            deleted += 1;
        }
    }
    tx.commit()?;

    msg_success!(Message::IntervalsDeleted(deleted));
    Ok(())
}
