//! Review session state machine.
//!
//! `Idle -> InProgress -> Completed`. A session walks a queue snapshot one
//! position at a time; each answer is scheduled, written back through the
//! store, and only then does the position advance.

use crate::algorithm::compute_next;
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, SessionError};
use crate::item::{Item, ItemUpdate};
use crate::matching::{compare_answers, MatchResult};
use crate::queue::ReviewQueue;
use crate::store::{CollectionId, ItemStore};
use crate::types::{ConfidenceRating, EffectiveSettings};
use serde::Serialize;

/// Lifecycle of a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    InProgress,
    Completed,
}

/// Snapshot of session progress for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub state: SessionState,
    pub position: usize,
    pub total: usize,
    pub score: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct PositionRecord {
    credited: bool,
    overridden: bool,
}

/// Drives one pass over a review queue.
pub struct ReviewSession<S, C = SystemClock> {
    store: S,
    clock: C,
    collection: CollectionId,
    settings: EffectiveSettings,
    state: SessionState,
    queue: ReviewQueue,
    position: usize,
    score: usize,
    records: Vec<PositionRecord>,
}

impl<S: ItemStore, C: Clock> ReviewSession<S, C> {
    /// Create an idle session writing to `collection` through `store`.
    pub fn new(store: S, clock: C, collection: CollectionId) -> Self {
        Self {
            store,
            clock,
            collection,
            settings: EffectiveSettings::default(),
            state: SessionState::Idle,
            queue: ReviewQueue::default(),
            position: 0,
            score: 0,
            records: Vec::new(),
        }
    }

    /// Use these settings when judging typed answers.
    pub fn with_settings(mut self, settings: EffectiveSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Begin a pass over `queue`.
    ///
    /// An empty queue is rejected and the session keeps its current state.
    /// Starting again from any state discards in-memory progress only.
    pub fn start(&mut self, queue: ReviewQueue) -> Result<()> {
        if queue.is_empty() {
            return Err(SessionError::EmptyQueue);
        }

        tracing::info!(
            collection = %self.collection,
            items = queue.len(),
            "starting review session"
        );

        self.records = vec![PositionRecord::default(); queue.len()];
        self.queue = queue;
        self.position = 0;
        self.score = 0;
        self.state = SessionState::InProgress;
        Ok(())
    }

    /// Load the collection, build a fresh queue and start on it.
    ///
    /// Items failing validation are left out of the queue (and untouched in
    /// the store).
    pub fn start_from_store(&mut self) -> Result<()> {
        let items = self.store.load_items(&self.collection)?;
        let total = items.len();
        let valid: Vec<Item> = items.into_iter().filter(Item::is_valid).collect();
        if valid.len() < total {
            tracing::warn!(
                collection = %self.collection,
                skipped = total - valid.len(),
                "skipping invalid items"
            );
        }
        self.start(ReviewQueue::build(valid))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Queue length of the current pass.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.position)
    }

    pub fn queue(&self) -> &ReviewQueue {
        &self.queue
    }

    pub fn collection(&self) -> &CollectionId {
        &self.collection
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            state: self.state,
            position: self.position,
            total: self.queue.len(),
            score: self.score,
        }
    }

    /// Item presented at the current position.
    pub fn current_item(&self) -> Result<&Item> {
        self.ensure_in_progress()?;
        self.queue
            .get(self.position)
            .ok_or(SessionError::NotInProgress)
    }

    /// Judge a typed answer against the current item's back.
    ///
    /// Read-only: the caller records the outcome with `record_answer`
    /// (using `MatchResult::rating`) or `override_answer`.
    pub fn judge_typed_answer(&self, typed: &str) -> Result<MatchResult> {
        let item = self.current_item()?;
        Ok(compare_answers(
            typed,
            &item.back,
            self.settings.matching_mode,
            self.settings.fuzzy_threshold,
        ))
    }

    /// Schedule `item` with `rating`, persist it, then advance.
    ///
    /// Returns the updated item. On any error nothing has been written and
    /// the position is unchanged, so the same item can be retried.
    pub fn record_answer(&mut self, item: &Item, rating: ConfidenceRating) -> Result<Item> {
        self.ensure_in_progress()?;

        if !item.is_valid() {
            tracing::warn!(item = %item.id, "rejecting invalid item");
            return Err(SessionError::InvalidItem);
        }
        // Content and scheduling state must equal the queued snapshot
        let current = self.current_item()?;
        if current != item {
            return Err(SessionError::ItemMismatch);
        }

        let result = compute_next(item.interval, item.ease_factor, rating, self.clock.now())?;
        let updated = item.apply_update(&ItemUpdate::scheduled(&result, rating));
        if !updated.is_valid() {
            return Err(SessionError::InvalidItem);
        }

        self.persist(&updated)?;

        let record = &mut self.records[self.position];
        if rating.is_success() && !record.credited {
            record.credited = true;
            self.score += 1;
        }

        self.position += 1;
        if self.position >= self.queue.len() {
            self.state = SessionState::Completed;
            tracing::info!(
                collection = %self.collection,
                score = self.score,
                total = self.queue.len(),
                "review session completed"
            );
        }

        Ok(updated)
    }

    /// Force the current presentation to count as a success.
    ///
    /// Records `item` with a perfect rating. A position can be overridden
    /// once; later attempts on it fail with `AlreadyOverridden`.
    pub fn override_answer(&mut self, item: &Item) -> Result<Item> {
        self.ensure_in_progress()?;

        let target = self
            .queue
            .iter()
            .position(|queued| queued.id == item.id)
            .ok_or(SessionError::ItemMismatch)?;
        if self.records[target].overridden {
            return Err(SessionError::AlreadyOverridden(target));
        }
        if target != self.position {
            return Err(SessionError::NotCurrent);
        }

        let updated = self.record_answer(item, ConfidenceRating::PERFECT)?;
        self.records[target].overridden = true;
        Ok(updated)
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.state == SessionState::InProgress {
            Ok(())
        } else {
            Err(SessionError::NotInProgress)
        }
    }

    /// Read-modify-write of the whole collection with `updated` swapped in.
    fn persist(&self, updated: &Item) -> Result<()> {
        let mut items = self.store.load_items(&self.collection)?;
        let slot = items
            .iter_mut()
            .find(|stored| stored.id == updated.id)
            .ok_or(SessionError::ItemNotFound)?;
        *slot = updated.clone();

        self.store.save_items(&self.collection, &items)?;
        tracing::debug!(
            collection = %self.collection,
            item = %updated.id,
            interval = updated.interval,
            "persisted review"
        );
        Ok(())
    }
}
