//! SM-2 style interval and ease-factor update.
//!
//! Success (rating >= 3) walks the interval 0 -> 1 -> 6 -> round(interval * ease)
//! and nudges the ease by the classical SuperMemo formula. Failure resets the
//! interval to one day and applies a flat -0.2 ease penalty. The ease is then
//! clamped to [1.3, 2.5].

use super::SchedulingResult;
use crate::error::ScheduleError;
use crate::types::{ConfidenceRating, MAX_EASE_FACTOR, MIN_EASE_FACTOR};
use chrono::{DateTime, Days, Utc};

/// Interval after the first successful review.
const FIRST_INTERVAL: u32 = 1;

/// Interval after the second successful review.
const SECOND_INTERVAL: u32 = 6;

/// Interval after any failed review.
const RELEARN_INTERVAL: u32 = 1;

/// Ease penalty for a failed review, independent of the rating.
const FAILURE_PENALTY: f64 = 0.2;

/// Compute the next scheduling state from the current one.
///
/// Pure: `now` is supplied by the caller, the system clock is never read.
/// The next review date keeps the time of day of `now` and advances by
/// `interval` calendar days.
pub fn compute_next(
    current_interval: u32,
    current_ease_factor: f64,
    rating: ConfidenceRating,
    now: DateTime<Utc>,
) -> Result<SchedulingResult, ScheduleError> {
    if !current_ease_factor.is_finite()
        || !(MIN_EASE_FACTOR..=MAX_EASE_FACTOR).contains(&current_ease_factor)
    {
        return Err(ScheduleError::EaseFactorOutOfRange(current_ease_factor));
    }

    let (interval, ease_factor) = if rating.is_success() {
        (
            success_interval(current_interval, current_ease_factor)?,
            current_ease_factor + ease_adjustment(rating),
        )
    } else {
        (RELEARN_INTERVAL, current_ease_factor - FAILURE_PENALTY)
    };
    let ease_factor = ease_factor.clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR);

    let next_review_date = now
        .checked_add_days(Days::new(u64::from(interval)))
        .ok_or(ScheduleError::DateOutOfRange)?;

    tracing::debug!(
        rating = rating.value(),
        current_interval,
        interval,
        ease_factor,
        "computed next review"
    );

    Ok(SchedulingResult {
        interval,
        ease_factor,
        next_review_date,
    })
}

fn success_interval(current_interval: u32, ease_factor: f64) -> Result<u32, ScheduleError> {
    match current_interval {
        0 => Ok(FIRST_INTERVAL),
        1 => Ok(SECOND_INTERVAL),
        n => {
            // f64::round rounds half away from zero
            let grown = (f64::from(n) * ease_factor).round();
            if grown > f64::from(u32::MAX) {
                return Err(ScheduleError::IntervalOverflow);
            }
            Ok(grown as u32)
        }
    }
}

fn ease_adjustment(rating: ConfidenceRating) -> f64 {
    let miss = f64::from(5 - rating.value());
    0.1 - miss * (0.08 + miss * 0.02)
}
