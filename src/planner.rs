//! Grading and "today" queue on top of an injected subject repository.

use crate::database::SubjectRepository;
use crate::error::Result;
use crate::models::{Grade, ReviewState, Subject, SubjectDraft, select_due};
use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info};

/// A subject in today's queue.
#[derive(Clone, Debug, PartialEq)]
pub struct DueSubject {
    pub subject: Subject,
    pub overdue_days: i64,
}

pub struct Planner<R> {
    repo: R,
}

impl<R: SubjectRepository> Planner<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a subject whose first review is the day after `now`.
    pub fn create_subject<Tz: TimeZone>(
        &self,
        draft: &SubjectDraft,
        now: &DateTime<Tz>,
    ) -> Result<Subject> {
        self.repo
            .create_subject(draft, &ReviewState::new(now), now.with_timezone(&Utc))
    }

    pub fn subjects(&self) -> Result<Vec<Subject>> {
        self.repo.list_subjects()
    }

    /// Subjects due on the calendar day of `now`, oldest first.
    pub fn today<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Vec<DueSubject>> {
        let subjects = self.repo.list_subjects()?;
        let due: Vec<DueSubject> = select_due(now, &subjects)
            .into_iter()
            .map(|item| DueSubject {
                subject: item.subject.clone(),
                overdue_days: item.overdue_days,
            })
            .collect();
        debug!(total = subjects.len(), due = due.len(), "today's queue computed");
        Ok(due)
    }

    pub fn grade<Tz: TimeZone>(
        &self,
        id: i64,
        grade: Grade,
        now: &DateTime<Tz>,
    ) -> Result<ReviewState> {
        info!(subject_id = id, %grade, "grading subject");
        self.grade_quality(id, grade.quality(), now)
    }

    /// Grades with a raw 0-5 quality, for callers outside the easy/medium/hard path.
    pub fn grade_quality<Tz: TimeZone>(
        &self,
        id: i64,
        quality: i32,
        now: &DateTime<Tz>,
    ) -> Result<ReviewState> {
        self.repo
            .update_schedule(id, |state| state.apply(quality, now))
    }

    /// Makes a subject due immediately without touching its SM-2 values.
    pub fn reset_for_review<Tz: TimeZone>(&self, id: i64, now: &DateTime<Tz>) -> Result<()> {
        info!(subject_id = id, "subject reset for review");
        self.repo.set_next_review_at(id, now.with_timezone(&Utc))
    }

    pub fn delete_subject(&self, id: i64) -> Result<()> {
        self.repo.delete_subject(id)
    }
}
