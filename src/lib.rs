pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod planner;

pub use database::{MemorySubjectStore, SqliteSubjectStore, SubjectRepository};
pub use error::{ParseGradeError, ScheduleError, StoreError};
pub use models::sm2::{Schedule, schedule};
pub use models::{DueItem, Grade, ReviewState, ReviewSession, Subject, SubjectDraft, select_due};
pub use planner::{DueSubject, Planner};
