//! Per-subject spaced repetition state.
use super::dates::add_days;
use super::sm2::{self, Schedule};
use crate::error::ScheduleError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    pub ease_factor: f64,
    pub repetitions: i32,
    /// Days until the most recently scheduled review.
    pub last_interval: i32,
    /// `None` when the stored value was missing or unreadable.
    pub next_review_at: Option<DateTime<Utc>>,
}

impl ReviewState {
    /// Fresh state for a subject created at `created_at`; first review is the next day.
    pub fn new<Tz: TimeZone>(created_at: &DateTime<Tz>) -> Self {
        Self {
            ease_factor: DEFAULT_EASE_FACTOR,
            repetitions: 0,
            last_interval: 0,
            next_review_at: add_days(created_at, 1).map(|at| at.with_timezone(&Utc)),
        }
    }

    /// Checks the stored values: the scheduler's input rules, plus a
    /// non-zero interval once a review has succeeded.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        sm2::validate_state(self.last_interval, self.repetitions, self.ease_factor)?;
        if self.repetitions >= 1 && self.last_interval < 1 {
            return Err(ScheduleError::InvalidState {
                field: "last_interval",
                value: self.last_interval.to_string(),
            });
        }
        Ok(())
    }

    /// Grades this state and returns the one to persist.
    ///
    /// `next_review_at` becomes `now` plus the new interval in calendar days of
    /// `now`'s timezone.
    pub fn apply<Tz: TimeZone>(
        &self,
        quality: i32,
        now: &DateTime<Tz>,
    ) -> Result<ReviewState, ScheduleError> {
        let Schedule {
            interval,
            repetitions,
            ease_factor,
        } = sm2::schedule(quality, self.last_interval, self.repetitions, self.ease_factor)?;

        // schedule() never yields a negative interval
        let days = u32::try_from(interval).unwrap_or(0);
        let next_review_at =
            add_days(now, days).ok_or_else(|| ScheduleError::OutOfRange {
                field: "next_review_at",
                value: format!("{days} days from now"),
            })?;

        Ok(ReviewState {
            ease_factor,
            repetitions,
            last_interval: interval,
            next_review_at: Some(next_review_at.with_timezone(&Utc)),
        })
    }

    /// Makes the subject due right now, leaving the SM-2 values alone.
    pub fn reset_for_review<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        self.next_review_at = Some(now.with_timezone(&Utc));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, day, hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_state_defaults() {
        let state = ReviewState::new(&at(10, 9));
        assert_eq!(state.ease_factor, 2.5);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.last_interval, 0);
        assert_eq!(state.next_review_at, Some(at(11, 9).with_timezone(&Utc)));
    }

    #[test]
    fn test_apply_sets_next_review_from_interval() {
        let state = ReviewState::new(&at(10, 9));
        let graded = state.apply(5, &at(11, 20)).unwrap();
        assert_eq!(graded.repetitions, 1);
        assert_eq!(graded.last_interval, 1);
        assert_eq!(graded.next_review_at, Some(at(12, 20).with_timezone(&Utc)));

        let graded = graded.apply(5, &at(12, 7)).unwrap();
        assert_eq!(graded.last_interval, 6);
        assert_eq!(graded.next_review_at, Some(at(18, 7).with_timezone(&Utc)));
    }

    #[test]
    fn test_apply_rejects_bad_quality_without_touching_state() {
        let state = ReviewState::new(&at(10, 9));
        let before = state.clone();
        assert_eq!(
            state.apply(8, &at(11, 9)),
            Err(ScheduleError::InvalidQuality(8))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_repeated_easy_reviews_stop_with_error_instead_of_panicking() {
        let now = at(10, 9);
        let mut state = ReviewState::new(&now);
        let mut rejected = None;

        for _ in 0..40 {
            match state.apply(5, &now) {
                Ok(next) => {
                    state = next;
                    state.reset_for_review(&now);
                }
                Err(err) => {
                    rejected = Some(err);
                    break;
                }
            }
        }

        assert!(matches!(rejected, Some(ScheduleError::OutOfRange { .. })));
        assert!(state.last_interval > 1_000_000);
    }

    #[test]
    fn test_next_review_past_calendar_range_is_rejected() {
        let state = ReviewState {
            ease_factor: 2.5,
            repetitions: 3,
            last_interval: 200_000_000,
            next_review_at: None,
        };
        assert!(matches!(
            state.apply(3, &at(10, 9)),
            Err(ScheduleError::OutOfRange {
                field: "next_review_at",
                ..
            })
        ));
    }

    #[test]
    fn test_validate() {
        assert!(ReviewState::new(&at(10, 9)).validate().is_ok());

        let mut state = ReviewState::new(&at(10, 9));
        state.repetitions = 2;
        state.last_interval = 0;
        assert!(matches!(
            state.validate(),
            Err(ScheduleError::InvalidState { field: "last_interval", .. })
        ));

        state.last_interval = 6;
        state.ease_factor = 1.1;
        assert!(matches!(
            state.validate(),
            Err(ScheduleError::InvalidState { field: "ease_factor", .. })
        ));
    }

    #[test]
    fn test_reset_for_review_moves_date_back() {
        let mut state = ReviewState::new(&at(10, 9)).apply(4, &at(11, 9)).unwrap();
        state.reset_for_review(&at(11, 10));
        assert_eq!(state.next_review_at, Some(at(11, 10).with_timezone(&Utc)));
        assert_eq!(state.repetitions, 1);
    }
}
