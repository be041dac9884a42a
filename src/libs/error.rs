//! Error taxonomy shared by the time-tracking core.
//!
//! - [`FormatError`]: a time or date string does not match its canonical
//!   pattern. Raised by the parsing functions in [`crate::libs::time_math`].
//! - [`ValidationError`]: one field-level violation on an interval or
//!   category. Validation always reports these as a `Vec`, so a caller can
//!   show every problem at once.
//! - [`AggregationWarning`]: a malformed record met during aggregation. It is
//!   collected next to the partial result and never aborts the aggregation.
//! - [`StoreError`]: failures at the persistence seam.

use thiserror::Error;

/// A time or date string that does not match the canonical pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("'{0}' is not an HH:MM:SS time")]
    Shape(String),

    #[error("'{0}' contains a non-numeric time component")]
    NotNumeric(String),

    #[error("'{value}' has {component} out of range (max {max})")]
    OutOfRange { value: String, component: &'static str, max: u32 },

    #[error("'{0}' is not a YYYY-MM-DD calendar date")]
    Date(String),

    #[error("'{0}' is not an RFC 3339 timestamp")]
    Timestamp(String),
}

/// The field a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Date,
    StartTime,
    EndTime,
    Duration,
    IsDifDays,
    Category,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Date => "date",
            Field::StartTime => "startTime",
            Field::EndTime => "endTime",
            Field::Duration => "duration",
            Field::IsDifDays => "isDifDays",
            Field::Category => "category",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level violation on user-supplied data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is too long ({actual} characters, max {max})")]
    TooLong { field: Field, max: usize, actual: usize },

    #[error("{field} must not be empty")]
    Empty { field: Field },

    #[error("{field}: {source}")]
    Format {
        field: Field,
        #[source]
        source: FormatError,
    },

    #[error("duration '{actual}' does not match start/end (expected '{expected}')")]
    StaleDuration { expected: String, actual: String },

    #[error("isDifDays is {actual} but start/end imply {expected}")]
    StaleRollover { expected: bool, actual: bool },
}

impl ValidationError {
    /// The field the violation is attached to, for form-level error display.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::TooLong { field, .. } => *field,
            ValidationError::Empty { field } => *field,
            ValidationError::Format { field, .. } => *field,
            ValidationError::StaleDuration { .. } => Field::Duration,
            ValidationError::StaleRollover { .. } => Field::IsDifDays,
        }
    }
}

/// A record skipped during aggregation because its stored duration is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("interval {id:?} ('{name}') skipped: {source}")]
pub struct AggregationWarning {
    pub id: Option<i64>,
    pub name: String,
    #[source]
    pub source: FormatError,
}

/// Failures of the persistence adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("record {0} not found")]
    NotFound(i64),

    #[error("category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("record failed validation: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Format(#[from] FormatError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

impl From<Vec<ValidationError>> for StoreError {
    fn from(errors: Vec<ValidationError>) -> Self {
        StoreError::Invalid(errors)
    }
}

impl From<ValidationError> for StoreError {
    fn from(error: ValidationError) -> Self {
        StoreError::Invalid(vec![error])
    }
}
