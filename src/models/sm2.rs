//! SM-2 (SuperMemo 2) spaced repetition scheduling.
//!
//! - Quality grades 0-2: repetitions reset and the subject comes back the next day.
//!   The ease factor is left as it was.
//! - Quality grades 3-5: interval grows 1 day → 6 days → previous interval × EF
//! - EF is adjusted after each successful review and never falls below 1.3

use crate::error::ScheduleError;

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MAX_QUALITY: i32 = 5;
/// Grades below this are failed recalls.
pub const PASSING_QUALITY: i32 = 3;

/// New scheduling values produced by a single graded review.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Schedule {
    pub interval: i32,
    pub repetitions: i32,
    pub ease_factor: f64,
}

/// Computes the next interval, repetition count and ease factor.
/// quality: 0-5 (0 = complete blackout, 5 = perfect response)
pub fn schedule(
    quality: i32,
    previous_interval: i32,
    previous_repetitions: i32,
    previous_ease_factor: f64,
) -> Result<Schedule, ScheduleError> {
    if !(0..=MAX_QUALITY).contains(&quality) {
        return Err(ScheduleError::InvalidQuality(quality));
    }
    validate_state(previous_interval, previous_repetitions, previous_ease_factor)?;

    if quality < PASSING_QUALITY {
        // Failed recall: start over, ease stays put
        return Ok(Schedule {
            interval: 1,
            repetitions: 0,
            ease_factor: previous_ease_factor,
        });
    }

    let q = f64::from(quality);
    let ease_factor = (previous_ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)))
        .max(MIN_EASE_FACTOR);

    let repetitions = previous_repetitions
        .checked_add(1)
        .ok_or_else(|| out_of_range("repetitions", f64::from(previous_repetitions) + 1.0))?;
    let interval = match repetitions {
        1 => 1,
        2 => 6,
        // previous interval times the *new* ease factor
        _ => {
            let days = (f64::from(previous_interval) * ease_factor).ceil();
            if days > f64::from(i32::MAX) {
                return Err(out_of_range("interval", days));
            }
            days as i32
        }
    };

    Ok(Schedule {
        interval,
        repetitions,
        ease_factor,
    })
}

fn out_of_range(field: &'static str, value: f64) -> ScheduleError {
    ScheduleError::OutOfRange {
        field,
        value: value.to_string(),
    }
}

/// Rejects scheduling state no review could have produced.
pub fn validate_state(
    interval: i32,
    repetitions: i32,
    ease_factor: f64,
) -> Result<(), ScheduleError> {
    if interval < 0 {
        return Err(ScheduleError::InvalidState {
            field: "interval",
            value: interval.to_string(),
        });
    }
    if repetitions < 0 {
        return Err(ScheduleError::InvalidState {
            field: "repetitions",
            value: repetitions.to_string(),
        });
    }
    // also rejects NaN and infinity
    if !(ease_factor >= MIN_EASE_FACTOR) || !ease_factor.is_finite() {
        return Err(ScheduleError::InvalidState {
            field: "ease_factor",
            value: ease_factor.to_string(),
        });
    }
    Ok(())
}
