//! Error types for srs-core.

use thiserror::Error;

/// Result type alias using SessionError.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Out-of-range input to the scheduling engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("ease factor {0} outside [1.3, 2.5]")]
    EaseFactorOutOfRange(f64),

    #[error("confidence rating {0} outside 0-5")]
    RatingOutOfRange(u8),

    #[error("interval does not fit in a day count")]
    IntervalOverflow,

    #[error("next review date out of range")]
    DateOutOfRange,
}

/// Errors reported by a persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Errors from review session operations.
///
/// None of these are fatal: the session stays at the same position and the
/// call can be retried.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is not in progress")]
    NotInProgress,

    #[error("cannot start a session with an empty queue")]
    EmptyQueue,

    #[error("item failed validation")]
    InvalidItem,

    #[error("item does not match the current presentation")]
    ItemMismatch,

    #[error("position {0} was already overridden")]
    AlreadyOverridden(usize),

    #[error("item is not the current presentation")]
    NotCurrent,

    #[error("item not found in stored collection")]
    ItemNotFound,

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that can occur while importing stored documents.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid item at index {index}")]
    InvalidItem { index: usize },
}
