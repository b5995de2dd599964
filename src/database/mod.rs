//! Subject persistence behind a repository interface.
//!
//! Scheduling code never talks to a store directly; it is handed something
//! implementing [`SubjectRepository`].

pub mod db;
pub mod memory;

pub use db::SqliteSubjectStore;
pub use memory::MemorySubjectStore;

use crate::error::{Result, ScheduleError};
use crate::models::{ReviewState, Subject, SubjectDraft};
use chrono::{DateTime, Utc};

pub trait SubjectRepository {
    /// Stores a new subject with the given review state and returns it with its id.
    fn create_subject(
        &self,
        draft: &SubjectDraft,
        review: &ReviewState,
        created_at: DateTime<Utc>,
    ) -> Result<Subject>;

    /// Stores copies of `subjects` under fresh ids, all or nothing.
    ///
    /// Every review state is validated before anything is written; one bad
    /// record fails the whole batch.
    fn restore_subjects(&self, subjects: &[Subject]) -> Result<Vec<Subject>>;

    /// All subjects, oldest first.
    fn list_subjects(&self) -> Result<Vec<Subject>>;

    fn load(&self, id: i64) -> Result<Subject>;

    /// Atomic read-modify-write of one subject's review state.
    ///
    /// `update` sees the current state and its result is written back before
    /// any other update of the same subject can read. Nothing is written when
    /// `update` fails.
    fn update_schedule<F>(&self, id: i64, update: F) -> Result<ReviewState>
    where
        F: FnOnce(&ReviewState) -> std::result::Result<ReviewState, ScheduleError>;

    /// Overwrites the next review date, bypassing the scheduler.
    fn set_next_review_at(&self, id: i64, at: DateTime<Utc>) -> Result<()>;

    fn delete_subject(&self, id: i64) -> Result<()>;
}
