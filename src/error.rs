//! Error types for loading, persisting and editing planner state
//!
//! The projection engine itself is infallible: segment problems are reported
//! as advisory issue strings and degenerate KPIs resolve to `None`.

use thiserror::Error;

/// A `GlobalInputs` or `Segment` value that violates its documented shape
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a positive whole number of years")]
    NonPositiveYears { field: &'static str },

    #[error("{field} must be at most {max} years")]
    TooManyYears { field: &'static str, max: u32 },

    #[error("{field} must be a finite, non-negative amount (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("{field} must be a rate between 0 and 1 (got {value})")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("starting accessible net worth ({accessible}) exceeds starting total net worth ({total})")]
    AccessibleExceedsTotal { accessible: f64, total: f64 },

    #[error("segment \"{id}\" has year bounds {start_year}..{end_year} outside 1..={max}")]
    SegmentYears { id: String, start_year: i32, end_year: i32, max: u32 },

    #[error("segment \"{id}\" has a non-finite {field}")]
    SegmentAmount { id: String, field: &'static str },
}

/// Failure reading or writing the persisted session state
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("state file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("state payload is not valid JSON for this schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("state schema version {found} does not match expected version {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("state payload failed validation: {0}")]
    Invalid(#[from] InputError),

    #[error("state payload has no scenarios")]
    NoScenarios,
}

/// Failure loading inputs, segments or rows from CSV files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown input field \"{0}\"")]
    UnknownField(String),

    #[error("value \"{value}\" for {field} is not a number")]
    BadNumber { field: String, value: String },

    #[error("row {line} has {found} columns, expected {expected}")]
    ColumnCount { line: usize, found: usize, expected: usize },

    #[error("loaded inputs are invalid: {0}")]
    Invalid(#[from] InputError),
}

/// Rejected edit against a `Session`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no scenario with id \"{0}\"")]
    UnknownScenario(String),

    #[error("scenario \"{scenario}\" has no segment with id \"{segment}\"")]
    UnknownSegment { scenario: String, segment: String },

    #[error("scenario \"{scenario}\" has no segment covering year {year}")]
    UncoveredYear { scenario: String, year: u32 },

    #[error("the last remaining scenario cannot be removed")]
    LastScenario,

    #[error(transparent)]
    Input(#[from] InputError),
}
