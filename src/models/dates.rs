//! Calendar-day helpers used by scheduling and due checks.
//!
//! Review dates only matter at day resolution: a timestamp is reduced to the
//! calendar date it falls on in its own timezone before any comparison.

use chrono::{DateTime, Days, Duration, NaiveDate, TimeZone};

/// Calendar date of `at` in its own timezone.
pub fn date_only<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.date_naive()
}

/// Whole calendar days from the day of `from` to the day of `to`.
///
/// Both timestamps are compared in the timezone of `to`.
pub fn days_between<Tz1, Tz2>(from: &DateTime<Tz1>, to: &DateTime<Tz2>) -> i64
where
    Tz1: TimeZone,
    Tz2: TimeZone,
{
    let from_day = from.with_timezone(&to.timezone()).date_naive();
    date_only(to).signed_duration_since(from_day).num_days()
}

/// Same wall-clock time `days` calendar days later.
///
/// Falls back to exact 24 hour steps when the target local time does not
/// exist (DST gap). `None` when the result is past the representable range.
pub fn add_days<Tz: TimeZone>(at: &DateTime<Tz>, days: u32) -> Option<DateTime<Tz>> {
    at.clone()
        .checked_add_days(Days::new(u64::from(days)))
        .or_else(|| {
            at.clone()
                .checked_add_signed(Duration::try_days(i64::from(days))?)
        })
}
