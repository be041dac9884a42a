use crate::{
    commands::report_store_error,
    db::{db::Db, store::Store},
    libs::{
        category::{self, CategoryRecord},
        config::Config,
        messages::Message,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// Create a category
    Add { name: String },
    /// List categories with their interval counts
    List,
    /// Rename a category and the intervals filed under it
    Rename { category: String, new_name: String },
    /// Delete a category; its intervals keep the label
    Delete {
        category: String,
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: CategoryArgs) -> Result<()> {
    let label = Config::read()?.uncategorized_label();
    let db = Db::new()?;
    match args.command {
        CategoryCommand::Add { name } => handle_add(&db, &name, &label),
        CategoryCommand::List => handle_list(&db),
        CategoryCommand::Rename { category, new_name } => handle_rename(&db, &category, &new_name, &label),
        CategoryCommand::Delete { category, yes } => handle_delete(&db, &category, yes),
    }
}

/// Looks a category up by id or by name in any letter case.
fn find(db: &Db, identifier: &str) -> Result<CategoryRecord> {
    let categories = db.categories();
    let found = match identifier.parse::<i64>() {
        Ok(id) => categories.get_by_id(id)?,
        Err(_) => categories.find_by_name(identifier)?,
    };
    match found {
        Some(category) => Ok(category),
        None => msg_bail_anyhow!(Message::CategoryNotFound(identifier.to_string())),
    }
}

/// Whether `name` is the label shown for uncategorized intervals.
pub fn is_reserved(name: &str, uncategorized_label: &str) -> bool {
    category::name_key(name) == category::name_key(uncategorized_label)
}

/// `name`, or the spelling intervals are already filed under in another case.
pub fn stored_spelling(db: &Db, name: &str) -> Result<String> {
    Ok(db.intervals().find_label(name)?.unwrap_or_else(|| name.trim().to_string()))
}

/// The stored spelling of `name`, creating the category if it is new.
///
/// An empty name, or the uncategorized label, means uncategorized and
/// resolves to the empty key. A new category takes the spelling of intervals
/// still filed under a deleted category of the same name.
pub fn resolve_category(db: &Db, name: &str, uncategorized_label: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() || is_reserved(name, uncategorized_label) {
        return Ok(String::new());
    }
    let categories = db.categories();
    if let Some(existing) = categories.find_by_name(name)? {
        return Ok(existing.name);
    }
    let spelling = stored_spelling(db, name)?;
    let created = categories.upsert(CategoryRecord::new(&spelling)).map_err(report_store_error)?;
    msg_info!(Message::CategoryCreated(created.name.clone()));
    Ok(created.name)
}

fn handle_add(db: &Db, name: &str, uncategorized_label: &str) -> Result<()> {
    if is_reserved(name, uncategorized_label) {
        msg_bail_anyhow!(Message::CategoryNameReserved(name.trim().to_string()));
    }
    let spelling = stored_spelling(db, name)?;
    let created = db.categories().upsert(CategoryRecord::new(&spelling)).map_err(report_store_error)?;
    msg_success!(Message::CategoryCreated(created.name));
    Ok(())
}

fn handle_list(db: &Db) -> Result<()> {
    let categories = db.categories().list_all()?;
    if categories.is_empty() {
        msg_info!(Message::NoCategoriesFound);
        return Ok(());
    }

    let intervals = db.intervals();
    let mut rows = Vec::with_capacity(categories.len());
    for category in categories {
        let used = intervals.count_by_category(&category.name)?;
        rows.push((category, used));
    }

    msg_print!(Message::CategoriesHeader, true);
    View::categories(&rows)?;
    Ok(())
}

fn handle_rename(db: &Db, identifier: &str, new_name: &str, uncategorized_label: &str) -> Result<()> {
    if is_reserved(new_name, uncategorized_label) {
        msg_bail_anyhow!(Message::CategoryNameReserved(new_name.trim().to_string()));
    }
    let category = find(db, identifier)?;
    let old_name = category.name.clone();

    // A case-only rename keeps the typed spelling; otherwise join any
    // intervals left under that name by a deleted category.
    let spelling = if category::name_key(new_name) == category.name_key() {
        new_name.trim().to_string()
    } else {
        stored_spelling(db, new_name)?
    };

    let tx = db.conn.unchecked_transaction()?;
    let renamed = db
        .categories()
        .upsert(CategoryRecord {
            id: category.id,
            name: spelling,
        })
        .map_err(report_store_error)?;
    let moved = db.intervals().rename_category(&old_name, &renamed.name)?;
    tx.commit()?;

    msg_success!(Message::CategoryRenamed(old_name, renamed.name));
    if moved > 0 {
        msg_info!(Message::CategoryIntervalsRelabeled(moved));
    }
    Ok(())
}

fn handle_delete(db: &Db, identifier: &str, yes: bool) -> Result<()> {
    let category = find(db, identifier)?;
    let used = db.intervals().count_by_category(&category.name)?;

    let confirmed = yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteCategory(category.name.clone(), used).to_string())
            .default(false)
            .interact()?;

    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    if let Some(id) = category.id {
        db.categories().delete_by_id(id)?;
    }
    msg_success!(Message::CategoryDeleted(category.name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::interval::IntervalRecord;
    use crate::libs::time_math::ClockTime;
    use chrono::NaiveDate;

    const LABEL: &str = "Uncategorized";

    fn file_under(db: &Db, category: &str) {
        let record = IntervalRecord::new(
            "task",
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            ClockTime::MIDNIGHT,
            ClockTime::MIDNIGHT,
            category,
        );
        db.intervals().upsert(record).unwrap();
    }

    #[test]
    fn rename_joins_intervals_left_by_a_deleted_category() {
        let db = Db::open_in_memory().unwrap();
        file_under(&db, "Work");
        handle_add(&db, "Office", LABEL).unwrap();
        file_under(&db, "Office");

        handle_rename(&db, "Office", "work", LABEL).unwrap();

        let names: Vec<String> = db.categories().list_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Work"]);
        assert_eq!(db.intervals().count_by_category("Work").unwrap(), 2);
    }

    #[test]
    fn case_only_rename_keeps_typed_spelling() {
        let db = Db::open_in_memory().unwrap();
        handle_add(&db, "sport", LABEL).unwrap();
        file_under(&db, "sport");

        handle_rename(&db, "sport", "Sport", LABEL).unwrap();
        assert_eq!(db.intervals().count_by_category("Sport").unwrap(), 1);
    }

    #[test]
    fn add_reuses_orphaned_label_spelling() {
        let db = Db::open_in_memory().unwrap();
        file_under(&db, "Reading");
        handle_add(&db, "READING", LABEL).unwrap();
        assert_eq!(db.categories().find_by_name("reading").unwrap().unwrap().name, "Reading");
    }

    #[test]
    fn uncategorized_label_cannot_name_a_category() {
        let db = Db::open_in_memory().unwrap();
        assert!(is_reserved(" uncategorized ", LABEL));
        assert!(handle_add(&db, "Uncategorized", LABEL).is_err());

        handle_add(&db, "Misc", LABEL).unwrap();
        assert!(handle_rename(&db, "Misc", "UNCATEGORIZED", LABEL).is_err());
        assert!(db.categories().find_by_name("Misc").unwrap().is_some());
    }
}
