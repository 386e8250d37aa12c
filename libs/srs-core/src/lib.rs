//! Spaced-repetition scheduling engine.
//!
//! Provides:
//! - The item model with its boundary validation and partial-update merge
//! - SM-2 style interval and ease-factor scheduling
//! - Due-ordered review queues
//! - A review session state machine writing through a pluggable store
//! - Free-text answer matching, collection statistics, JSON documents

pub mod algorithm;
pub mod clock;
pub mod document;
pub mod error;
pub mod item;
pub mod matching;
pub mod queue;
pub mod session;
pub mod stats;
pub mod store;
pub mod types;

pub use algorithm::{compute_next, SchedulingResult};
pub use clock::{Clock, FixedClock, SystemClock};
pub use document::{export_items, import_items};
pub use error::{ImportError, Result, ScheduleError, SessionError, StoreError};
pub use item::{Item, ItemId, ItemUpdate};
pub use matching::{compare_answers, levenshtein_distance, normalized_similarity, MatchResult};
pub use queue::{build_queue, ReviewQueue};
pub use session::{ReviewSession, SessionProgress, SessionState};
pub use stats::CollectionStats;
pub use store::{CollectionId, ItemStore, MemoryStore};
pub use types::{
    CollectionSettings, ConfidenceRating, EffectiveSettings, MatchingMode, StudySettings,
    MAX_EASE_FACTOR, MIN_EASE_FACTOR, SUCCESS_THRESHOLD,
};
