use crate::{
    commands::category::{is_reserved, resolve_category, stored_spelling},
    db::{db::Db, store::Store},
    libs::{
        category::CategoryRecord,
        config::Config,
        error::StoreError,
        messages::Message,
        schema::{self, Upgrade},
    },
    msg_bail_anyhow, msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file: a tally export, or an array of records from an older version
    file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

/// What an import wrote.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportSummary {
    pub intervals: usize,
    pub categories: usize,
    /// Categories already present under some spelling.
    pub existing_categories: Vec<String>,
    /// Categories whose name failed validation, with the reason.
    pub rejected_categories: Vec<(String, String)>,
}

/// Writes upgraded intervals and categories in one transaction.
///
/// Intervals get fresh ids. Categories that already exist in any letter case
/// are skipped, and intervals are filed under the stored spelling. Intervals
/// labelled with `uncategorized_label` are imported as uncategorized.
pub fn import_records(
    db: &Db,
    upgrade: Upgrade,
    categories: Vec<CategoryRecord>,
    uncategorized_label: &str,
) -> Result<ImportSummary> {
    let tx = db.conn.unchecked_transaction()?;
    let mut summary = ImportSummary::default();

    for category in categories {
        if is_reserved(&category.name, uncategorized_label) {
            let reason = Message::CategoryNameReserved(category.name.clone()).to_string();
            summary.rejected_categories.push((category.name, reason));
            continue;
        }
        let spelling = stored_spelling(db, &category.name)?;
        match db.categories().upsert(CategoryRecord::new(&spelling)) {
            Ok(_) => summary.categories += 1,
            Err(StoreError::DuplicateCategory(name)) => summary.existing_categories.push(name),
            Err(e @ StoreError::Invalid(_)) => summary.rejected_categories.push((category.name, e.to_string())),
            Err(e) => return Err(e.into()),
        }
    }

    let known = db.categories().list_all()?.len();
    for mut record in upgrade.records {
        record.id = None;
        record.category = resolve_category(db, &record.category, uncategorized_label)?;
        db.intervals().upsert(record)?;
        summary.intervals += 1;
    }
    summary.categories += db.categories().list_all()?.len() - known;

    tx.commit()?;
    Ok(summary)
}

pub fn cmd(args: ImportArgs) -> Result<()> {
    let json = match fs::read_to_string(&args.file) {
        Ok(json) => json,
        Err(_) => msg_bail_anyhow!(Message::ImportFileReadFailed(args.file.display().to_string())),
    };
    let (upgrade, categories) = match schema::read_document(&json) {
        Ok(document) => document,
        Err(e) => msg_bail_anyhow!(Message::ImportParseFailed(e.to_string())),
    };

    for rejected in &upgrade.rejected {
        let errors = rejected.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
        msg_warning!(Message::ImportRecordSkipped(
            rejected.index,
            rejected.name.clone().unwrap_or_default(),
            errors
        ));
    }

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmImport(upgrade.records.len()).to_string())
            .default(true)
            .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    let label = Config::read()?.uncategorized_label();
    let db = Db::new()?;
    let summary = import_records(&db, upgrade, categories, &label)?;
    for name in &summary.existing_categories {
        msg_info!(Message::ImportCategorySkipped(name.clone(), Message::CategoryExists(name.clone()).to_string()));
    }
    for (name, reason) in summary.rejected_categories {
        msg_warning!(Message::ImportCategorySkipped(name, reason));
    }
    msg_success!(Message::ImportCompleted(summary.intervals, summary.categories));
    Ok(())
}
