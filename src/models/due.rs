//! Picks the subjects whose review day has come.
//!
//! Comparison is done on calendar days in the timezone of `now`, so a subject
//! due at 23:00 is already due at midnight and repeated checks on the same
//! day agree with each other.

use super::Subject;
use super::dates::{date_only, days_between};
use chrono::{DateTime, TimeZone, Utc};

/// Anything the selector can check for due-ness.
pub trait Reviewable {
    fn subject_id(&self) -> i64;
    fn next_review_at(&self) -> Option<DateTime<Utc>>;
}

impl Reviewable for Subject {
    fn subject_id(&self) -> i64 {
        self.id
    }

    fn next_review_at(&self) -> Option<DateTime<Utc>> {
        self.review.next_review_at
    }
}

#[derive(Debug)]
pub struct DueItem<'a, S> {
    pub subject: &'a S,
    /// 0 when due today, otherwise how many days late. Display only.
    pub overdue_days: i64,
}

pub fn is_due<Tz: TimeZone>(next_review_at: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    date_only(&next_review_at.with_timezone(&now.timezone())) <= date_only(now)
}

/// Returns the due subjects, oldest review date first; ties keep input order.
/// Subjects without a review date are left out.
pub fn select_due<'a, S, Tz>(now: &DateTime<Tz>, subjects: &'a [S]) -> Vec<DueItem<'a, S>>
where
    S: Reviewable,
    Tz: TimeZone,
{
    let mut due: Vec<(DateTime<Utc>, DueItem<'a, S>)> = subjects
        .iter()
        .filter_map(|subject| {
            let next = subject.next_review_at()?;
            is_due(&next, now).then(|| {
                let item = DueItem {
                    subject,
                    overdue_days: days_between(&next, now),
                };
                (next, item)
            })
        })
        .collect();

    // stable sort
    due.sort_by_key(|(next, _)| *next);
    due.into_iter().map(|(_, item)| item).collect()
}
