//! In-process subject store. Used by tests and by callers that keep their own persistence.
use super::SubjectRepository;
use crate::error::{Result, ScheduleError, StoreError};
use crate::models::{ReviewState, Subject, SubjectDraft};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    next_id: i64,
    subjects: Vec<Subject>,
}

impl Inner {
    fn get_mut(&mut self, id: i64) -> Result<&mut Subject> {
        self.subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::SubjectNotFound(id))
    }
}

#[derive(Default)]
pub struct MemorySubjectStore {
    inner: Mutex<Inner>,
}

impl MemorySubjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl SubjectRepository for MemorySubjectStore {
    fn create_subject(
        &self,
        draft: &SubjectDraft,
        review: &ReviewState,
        created_at: DateTime<Utc>,
    ) -> Result<Subject> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let subject = Subject {
            id: inner.next_id,
            title: draft.title.clone(),
            context: draft.context.clone(),
            raw_notes: draft.raw_notes.clone(),
            mind_map: draft.mind_map_or_root(),
            created_at,
            review: review.clone(),
        };
        inner.subjects.push(subject.clone());
        Ok(subject)
    }

    fn restore_subjects(&self, subjects: &[Subject]) -> Result<Vec<Subject>> {
        for subject in subjects {
            subject.review.validate()?;
        }

        let mut inner = self.lock()?;
        let mut restored = Vec::with_capacity(subjects.len());
        for subject in subjects {
            inner.next_id += 1;
            restored.push(Subject {
                id: inner.next_id,
                ..subject.clone()
            });
        }
        inner.subjects.extend(restored.iter().cloned());
        Ok(restored)
    }

    fn list_subjects(&self) -> Result<Vec<Subject>> {
        let mut subjects = self.lock()?.subjects.clone();
        subjects.sort_by_key(|s| (s.created_at, s.id));
        Ok(subjects)
    }

    fn load(&self, id: i64) -> Result<Subject> {
        Ok(self.lock()?.get_mut(id)?.clone())
    }

    fn update_schedule<F>(&self, id: i64, update: F) -> Result<ReviewState>
    where
        F: FnOnce(&ReviewState) -> std::result::Result<ReviewState, ScheduleError>,
    {
        let mut inner = self.lock()?;
        let subject = inner.get_mut(id)?;
        let next = update(&subject.review)?;
        subject.review = next.clone();
        Ok(next)
    }

    fn set_next_review_at(&self, id: i64, at: DateTime<Utc>) -> Result<()> {
        self.lock()?.get_mut(id)?.review.next_review_at = Some(at);
        Ok(())
    }

    fn delete_subject(&self, id: i64) -> Result<()> {
        let mut inner = self.lock()?;
        let before = inner.subjects.len();
        inner.subjects.retain(|s| s.id != id);
        if inner.subjects.len() == before {
            return Err(StoreError::SubjectNotFound(id));
        }
        Ok(())
    }
}
