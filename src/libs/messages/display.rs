//! Text for every [`Message`] variant.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === INTERVAL MESSAGES ===
            Message::IntervalCreated(id, name) => format!("Interval '{}' saved with id {}", name, id),
            Message::IntervalUpdated(id) => format!("Interval {} updated", id),
            Message::IntervalNotFound(id) => format!("Interval {} not found", id),
            Message::IntervalsDeleted(count) => format!("Deleted {} interval(s)", count),
            Message::IntervalsNotFoundForIds(ids) => format!(
                "Intervals not found for ids: {}",
                ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
            ),
            Message::IntervalsHeader(from, to) => format!("Intervals {} .. {}", from, to),
            Message::NoIntervalsFound => "No intervals found".to_string(),
            Message::NoIntervalIdsProvided => "No interval ids provided".to_string(),
            Message::NoChangesDetected => "No changes detected".to_string(),
            Message::InvalidField(field, error) => format!("{}: {}", field, error),
            Message::ConfirmDeleteIntervals(count) => format!("Delete {} interval(s)?", count),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryRenamed(old, new) => format!("Category '{}' renamed to '{}'", old, new),
            Message::CategoryDeleted(name) => format!("Category '{}' deleted", name),
            Message::CategoryExists(name) => format!("Category '{}' already exists", name),
            Message::CategoryNotFound(name) => format!("Category '{}' not found", name),
            Message::CategoryNameReserved(name) => {
                format!("'{}' is the label for uncategorized intervals and cannot name a category", name)
            }
            Message::CategoriesHeader => "Categories".to_string(),
            Message::NoCategoriesFound => "No categories yet".to_string(),
            Message::CategoryIntervalsRelabeled(count) => format!("{} interval(s) moved to the new name", count),
            Message::ConfirmDeleteCategory(name, 0) => format!("Delete category '{}'?", name),
            Message::ConfirmDeleteCategory(name, used) => format!(
                "Delete category '{}'? {} interval(s) keep it as their label",
                name, used
            ),

            // === TIMER MESSAGES ===
            Message::TimerStarted(name) => format!("Timer started for '{}'", name),
            Message::TimerStopped(name, duration) => format!("Timer stopped for '{}' at {}", name, duration),
            Message::TimerAlreadyRunning(name) => format!("The timer is already running for '{}'", name),
            Message::TimerSwitched(name) => format!("Stopped the running timer of '{}' first", name),
            Message::TimerRunning(name, elapsed) => format!("'{}' running for {}", name, elapsed),
            Message::NoTimerRunning => "No timer is running".to_string(),
            Message::TimerIntervalMissing(id) => format!("The timer pointed at interval {} which no longer exists; cleared", id),
            Message::TimerFollowHint => "Press Ctrl-C to stop watching".to_string(),

            // === STATISTICS MESSAGES ===
            Message::StatsHeader(from, to) => format!("Time per category {} .. {}", from, to),
            Message::StatsTotal(total, count) => format!("Total: {} across {} interval(s)", total, count),
            Message::TrendHeader(category) => format!("Daily trend for '{}'", category),
            Message::NoDataForPeriod => "No data for the selected period".to_string(),
            Message::InvalidDateRange(from, to) => format!("Start date {} is after end date {}", from, to),
            Message::RecordsSkipped(count) => format!("{} record(s) with an unreadable duration were skipped", count),
            Message::RecordSkipped(reason) => format!("Skipped {}", reason),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigModuleStats => "Statistics".to_string(),
            Message::ConfigModuleDisplay => "Display".to_string(),
            Message::SelectConfigModules => "Select sections to configure".to_string(),
            Message::PromptDefaultRangeDays => "Default statistics range (days)".to_string(),
            Message::PromptUncategorizedLabel => "Label for intervals without a category".to_string(),

            // === EXPORT / IMPORT MESSAGES ===
            Message::ExportingData(format) => format!("Exporting data as {}...", format),
            Message::ExportCompleted(path) => format!("Data exported to {}", path),
            Message::ImportCompleted(intervals, categories) => {
                format!("Imported {} interval(s) and {} category(ies)", intervals, categories)
            }
            Message::ImportRecordSkipped(index, name, errors) => {
                format!("Record #{} ('{}') skipped: {}", index, name, errors)
            }
            Message::ImportCategorySkipped(name, reason) => format!("Category '{}' skipped: {}", name, reason),
            Message::ImportFileReadFailed(path) => format!("Failed to read {}", path),
            Message::ImportParseFailed(error) => format!("Import file is not valid JSON: {}", error),
            Message::ConfirmImport(count) => format!("Import {} interval(s)?", count),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::NoMigrationsApplied => "No migrations applied yet".to_string(),

            // === GENERIC ===
            Message::RecordRejected => "Nothing was saved; fix the fields above".to_string(),
            Message::RecordNotFound(id) => format!("Record {} not found", id),
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidDate(value) => format!("'{}' is not a YYYY-MM-DD date", value),
            Message::InvalidTime(value) => format!("'{}' is not an HH:MM:SS time", value),
        };

        write!(f, "{}", text)
    }
}
