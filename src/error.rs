//! Error types shared by the scheduler, the stores and the front end.

use thiserror::Error;

/// Rejected scheduler input. Nothing is computed when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("invalid quality {0}: expected a grade between 0 and 5")]
    InvalidQuality(i32),

    #[error("invalid review state: {field} = {value}")]
    InvalidState { field: &'static str, value: String },

    #[error("{field} out of range after review: {value}")]
    OutOfRange { field: &'static str, value: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown grade '{0}': expected easy, medium or hard")]
pub struct ParseGradeError(pub String);

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Subject not found: {0}")]
    SubjectNotFound(i64),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("store lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;
