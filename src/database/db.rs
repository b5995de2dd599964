//! SQLite-backed subject store
//!
//! Handles database initialization, CRUD operations for subjects,
//! and SM-2 review data management.

use super::SubjectRepository;
use crate::error::{Result, ScheduleError, StoreError};
use crate::models::{MindMapNode, ReviewState, Subject, SubjectDraft};
use chrono::{DateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

const SELECT_SUBJECTS: &str = "SELECT s.id, s.title, s.context, s.raw_notes, s.mind_map, s.created_at,
            r.ease_factor, r.repetitions, r.last_interval, r.next_review_at
     FROM subjects s
     JOIN review_data r ON s.id = r.subject_id";

pub struct SqliteSubjectStore {
    conn: Mutex<Connection>,
}

impl SqliteSubjectStore {
    /// Opens (or creates) the database file and makes sure the tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening subject database");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

/// Creates tables for subjects and SM-2 review data.
fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            context TEXT NOT NULL DEFAULT '',
            raw_notes TEXT NOT NULL DEFAULT '',
            mind_map TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS review_data (
            subject_id INTEGER PRIMARY KEY,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            repetitions INTEGER NOT NULL DEFAULT 0,
            last_interval INTEGER NOT NULL DEFAULT 0,
            next_review_at INTEGER,
            FOREIGN KEY (subject_id) REFERENCES subjects(id) ON DELETE CASCADE
        );",
    )?;
    Ok(())
}

/// Unix seconds; NULL, text, blobs and out-of-range values all read as `None`.
fn timestamp_from_ref(value: ValueRef<'_>) -> Option<DateTime<Utc>> {
    match value {
        ValueRef::Integer(secs) => DateTime::from_timestamp(secs, 0),
        _ => None,
    }
}

fn subject_from_row(row: &Row<'_>) -> rusqlite::Result<Subject> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let mind_map_json: String = row.get(4)?;
    let created_at = timestamp_from_ref(row.get_ref(5)?);
    let next = timestamp_from_ref(row.get_ref(9)?);

    let mind_map = serde_json::from_str(&mind_map_json).unwrap_or_else(|err| {
        warn!(subject_id = id, error = %err, "unreadable mind map, falling back to root node");
        MindMapNode::root(title.clone())
    });

    if next.is_none() {
        warn!(subject_id = id, "subject has no usable next review date");
    }

    Ok(Subject {
        id,
        title,
        context: row.get(2)?,
        raw_notes: row.get(3)?,
        mind_map,
        created_at: created_at.unwrap_or_default(),
        review: ReviewState {
            ease_factor: row.get(6)?,
            repetitions: row.get(7)?,
            last_interval: row.get(8)?,
            next_review_at: next,
        },
    })
}

fn load_review_state(conn: &Connection, id: i64) -> Result<ReviewState> {
    conn.query_row(
        "SELECT ease_factor, repetitions, last_interval, next_review_at
         FROM review_data WHERE subject_id = ?1",
        params![id],
        |row| {
            Ok(ReviewState {
                ease_factor: row.get(0)?,
                repetitions: row.get(1)?,
                last_interval: row.get(2)?,
                next_review_at: timestamp_from_ref(row.get_ref(3)?),
            })
        },
    )
    .optional()?
    .ok_or(StoreError::SubjectNotFound(id))
}

fn insert_subject(
    conn: &Connection,
    draft: &SubjectDraft,
    review: &ReviewState,
    created_at: DateTime<Utc>,
) -> Result<Subject> {
    let mind_map = draft.mind_map_or_root();
    let mind_map_json = serde_json::to_string(&mind_map)?;

    conn.execute(
        "INSERT INTO subjects (title, context, raw_notes, mind_map, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            draft.title,
            draft.context,
            draft.raw_notes,
            mind_map_json,
            created_at.timestamp()
        ],
    )?;
    let id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO review_data (subject_id, ease_factor, repetitions, last_interval, next_review_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            id,
            review.ease_factor,
            review.repetitions,
            review.last_interval,
            review.next_review_at.map(|at| at.timestamp())
        ],
    )?;

    Ok(Subject {
        id,
        title: draft.title.clone(),
        context: draft.context.clone(),
        raw_notes: draft.raw_notes.clone(),
        mind_map,
        created_at,
        review: review.clone(),
    })
}

impl SubjectRepository for SqliteSubjectStore {
    /// Inserts the subject and its review data in one transaction.
    fn create_subject(
        &self,
        draft: &SubjectDraft,
        review: &ReviewState,
        created_at: DateTime<Utc>,
    ) -> Result<Subject> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let subject = insert_subject(&tx, draft, review, created_at)?;
        tx.commit()?;

        info!(subject_id = subject.id, title = %subject.title, "subject created");
        Ok(subject)
    }

    fn restore_subjects(&self, subjects: &[Subject]) -> Result<Vec<Subject>> {
        for subject in subjects {
            subject.review.validate()?;
        }

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let restored = subjects
            .iter()
            .map(|subject| {
                insert_subject(
                    &tx,
                    &SubjectDraft::from(subject),
                    &subject.review,
                    subject.created_at,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        tx.commit()?;

        info!(count = restored.len(), "subjects restored");
        Ok(restored)
    }

    fn list_subjects(&self) -> Result<Vec<Subject>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_SUBJECTS} ORDER BY s.created_at ASC, s.id ASC"
        ))?;

        let subjects = stmt
            .query_map([], subject_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(subjects)
    }

    fn load(&self, id: i64) -> Result<Subject> {
        let conn = self.lock()?;
        conn.query_row(
            &format!("{SELECT_SUBJECTS} WHERE s.id = ?1"),
            params![id],
            subject_from_row,
        )
        .optional()?
        .ok_or(StoreError::SubjectNotFound(id))
    }

    fn update_schedule<F>(&self, id: i64, update: F) -> Result<ReviewState>
    where
        F: FnOnce(&ReviewState) -> std::result::Result<ReviewState, ScheduleError>,
    {
        let mut conn = self.lock()?;
        // IMMEDIATE takes the write lock up front so other connections to the
        // same file cannot interleave between our read and write
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = load_review_state(&tx, id)?;
        let next = update(&current)?;

        tx.execute(
            "UPDATE review_data
             SET ease_factor = ?1, repetitions = ?2, last_interval = ?3, next_review_at = ?4
             WHERE subject_id = ?5",
            params![
                next.ease_factor,
                next.repetitions,
                next.last_interval,
                next.next_review_at.map(|at| at.timestamp()),
                id
            ],
        )?;
        tx.commit()?;

        debug!(
            subject_id = id,
            interval = next.last_interval,
            repetitions = next.repetitions,
            ease_factor = next.ease_factor,
            "review schedule updated"
        );
        Ok(next)
    }

    fn set_next_review_at(&self, id: i64, at: DateTime<Utc>) -> Result<()> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE review_data SET next_review_at = ?1 WHERE subject_id = ?2",
            params![at.timestamp(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::SubjectNotFound(id));
        }
        debug!(subject_id = id, next_review_at = %at, "next review date overwritten");
        Ok(())
    }

    fn delete_subject(&self, id: i64) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM review_data WHERE subject_id = ?1", params![id])?;
        let deleted = tx.execute("DELETE FROM subjects WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::SubjectNotFound(id));
        }
        tx.commit()?;
        info!(subject_id = id, "subject deleted");
        Ok(())
    }
}
