//! Review session over today's queue.
//! Walks the due subjects one by one; subjects graded below a passing quality
//! come back in a further round.

use crate::database::SubjectRepository;
use crate::error::Result;
use crate::models::sm2::PASSING_QUALITY;
use crate::models::{Grade, Subject};
use crate::planner::{DueSubject, Planner};
use chrono::{DateTime, TimeZone, Utc};

/// One subject taking part in the session.
#[derive(Clone, Debug)]
pub struct SessionEntry {
    pub subject: Subject,
    pub overdue_days: i64,
    pub passed: bool,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

pub struct ReviewSession<'p, R> {
    planner: &'p Planner<R>,
    pub entries: Vec<SessionEntry>,
    pub current_round: Vec<usize>,
    pub current_index: usize,
    pub show_mind_map: bool,
    pub round_number: usize,
}

impl<'p, R: SubjectRepository> ReviewSession<'p, R> {
    /// Starts a session from whatever is due on the day of `now`.
    pub fn start<Tz: TimeZone>(planner: &'p Planner<R>, now: &DateTime<Tz>) -> Result<Self> {
        Ok(Self::from_due(planner, planner.today(now)?))
    }

    pub fn from_due(planner: &'p Planner<R>, due: Vec<DueSubject>) -> Self {
        let entries: Vec<_> = due
            .into_iter()
            .map(|item| SessionEntry {
                subject: item.subject,
                overdue_days: item.overdue_days,
                passed: false,
                last_reviewed_at: None,
            })
            .collect();
        let current_round = (0..entries.len()).collect();

        Self {
            planner,
            entries,
            current_round,
            current_index: 0,
            show_mind_map: false,
            round_number: 1,
        }
    }

    pub fn current(&self) -> Option<&SessionEntry> {
        self.current_round
            .get(self.current_index)
            .and_then(|&idx| self.entries.get(idx))
    }

    pub fn toggle_mind_map(&mut self) {
        self.show_mind_map = !self.show_mind_map;
    }

    pub fn next_subject(&mut self) {
        if self.current_index + 1 < self.current_round.len() {
            self.current_index += 1;
            self.show_mind_map = false;
        } else {
            self.start_next_round();
        }
    }

    /// Starts a new round with the subjects that failed this one.
    /// With nothing left to retry, the session is complete.
    fn start_next_round(&mut self) {
        let failed: Vec<usize> = self
            .current_round
            .iter()
            .copied()
            .filter(|&idx| self.entries.get(idx).is_some_and(|entry| !entry.passed))
            .collect();

        if !failed.is_empty() {
            self.current_round = failed;
            self.current_index = 0;
            self.show_mind_map = false;
            self.round_number += 1;
        }
    }

    pub fn grade_current<Tz: TimeZone>(&mut self, grade: Grade, now: &DateTime<Tz>) -> Result<()> {
        self.grade_current_quality(grade.quality(), now)
    }

    /// Persists the grade of the current subject through the planner.
    /// The session state is only changed once the store accepted the update.
    ///
    /// Retry rounds run SM-2 again on the same day, so a subject failed and
    /// then graded hard ends the session at repetitions 1, interval 1.
    pub fn grade_current_quality<Tz: TimeZone>(
        &mut self,
        quality: i32,
        now: &DateTime<Tz>,
    ) -> Result<()> {
        let Some(&idx) = self.current_round.get(self.current_index) else {
            return Ok(());
        };
        let Some(entry) = self.entries.get_mut(idx) else {
            return Ok(());
        };

        let review = self.planner.grade_quality(entry.subject.id, quality, now)?;
        entry.subject.review = review;
        entry.passed = quality >= PASSING_QUALITY;
        entry.last_reviewed_at = Some(now.with_timezone(&Utc));
        Ok(())
    }

    pub fn passed_count(&self) -> usize {
        self.current_round
            .iter()
            .filter(|&&idx| self.entries.get(idx).is_some_and(|entry| entry.passed))
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.passed_count()
    }

    pub fn is_completed(&self) -> bool {
        self.current_round.is_empty() || self.passed_count() == self.total_count()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} subjects", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (retry): {} subjects to review again",
                self.round_number,
                self.total_count()
            )
        }
    }
}
