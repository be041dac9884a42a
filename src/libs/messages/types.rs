/// Every user-facing text the application prints, grouped by feature.
///
/// The wording lives in [`Display`](std::fmt::Display) (see `display.rs`),
/// so commands only pick a variant and pass its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === INTERVAL MESSAGES ===
    IntervalCreated(i64, String), // id, name
    IntervalUpdated(i64),
    IntervalNotFound(i64),
    IntervalsDeleted(usize),
    IntervalsNotFoundForIds(Vec<i64>),
    IntervalsHeader(String, String), // from, to
    NoIntervalsFound,
    NoIntervalIdsProvided,
    NoChangesDetected,
    InvalidField(String, String), // field, error
    ConfirmDeleteIntervals(usize),

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryRenamed(String, String), // old, new
    CategoryDeleted(String),
    CategoryExists(String),
    CategoryNotFound(String),
    CategoryNameReserved(String),
    CategoriesHeader,
    NoCategoriesFound,
    CategoryIntervalsRelabeled(usize),
    ConfirmDeleteCategory(String, usize), // name, intervals still using it

    // === TIMER MESSAGES ===
    TimerStarted(String),
    TimerStopped(String, String), // name, duration
    TimerAlreadyRunning(String),
    TimerSwitched(String),        // previous interval name
    TimerRunning(String, String), // name, elapsed
    NoTimerRunning,
    TimerIntervalMissing(i64),
    TimerFollowHint,

    // === STATISTICS MESSAGES ===
    StatsHeader(String, String), // from, to
    StatsTotal(String, usize),   // total time, interval count
    TrendHeader(String),
    NoDataForPeriod,
    InvalidDateRange(String, String),
    RecordsSkipped(usize),
    RecordSkipped(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleStats,
    ConfigModuleDisplay,
    SelectConfigModules,
    PromptDefaultRangeDays,
    PromptUncategorizedLabel,

    // === EXPORT / IMPORT MESSAGES ===
    ExportingData(String), // format
    ExportCompleted(String),
    ImportCompleted(usize, usize), // intervals, categories
    ImportRecordSkipped(usize, String, String), // index, name, errors
    ImportCategorySkipped(String, String),      // name, reason
    ImportFileReadFailed(String),
    ImportParseFailed(String),
    ConfirmImport(usize),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),
    MigrationFailed(u32, String), // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    NoMigrationsApplied,

    // === GENERIC ===
    RecordRejected,
    RecordNotFound(i64),
    OperationCancelled,
    InvalidDate(String),
    InvalidTime(String),
}
