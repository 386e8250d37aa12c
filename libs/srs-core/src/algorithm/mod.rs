//! Spaced repetition scheduling.

pub mod sm2;

pub use sm2::compute_next;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduling state computed after a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub interval: u32,
    pub ease_factor: f64,
    pub next_review_date: DateTime<Utc>,
}
