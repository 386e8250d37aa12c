//! End-to-end review flow over an in-memory store.

mod common;

use chrono::Duration;
use pretty_assertions::assert_eq;
use srs_core::{
    build_queue, ConfidenceRating, FixedClock, ItemStore, ReviewQueue, ReviewSession,
    SessionError, SessionState,
};

use common::{collection, overdue_items, seeded_store, start_of_day};

fn rating(value: u8) -> ConfidenceRating {
    ConfidenceRating::new(value).unwrap()
}

#[test]
fn success_moves_item_back_in_rebuilt_queue() {
    let items = overdue_items(&[("Peru", "Lima"), ("Chile", "Santiago"), ("Kenya", "Nairobi")]);
    let store = seeded_store(&items);
    let clock = FixedClock::new(start_of_day());
    let mut session = ReviewSession::new(&store, &clock, collection());

    session.start(ReviewQueue::build(store.load_items(&collection()).unwrap())).unwrap();
    let first = session.current_item().unwrap().clone();
    assert_eq!(first.front, "Peru");
    session.record_answer(&first, rating(5)).unwrap();

    let rebuilt = build_queue(store.load_items(&collection()).unwrap());
    let fronts: Vec<_> = rebuilt.iter().map(|i| i.front.as_str()).collect();
    assert_eq!(fronts, vec!["Chile", "Kenya", "Peru"]);
    assert_eq!(
        rebuilt[2].next_review_date,
        Some(start_of_day() + Duration::days(1))
    );
}

#[test]
fn session_completes_after_third_confirmed_answer() {
    let items = overdue_items(&[("Peru", "Lima"), ("Chile", "Santiago"), ("Kenya", "Nairobi")]);
    let store = seeded_store(&items);
    let clock = FixedClock::new(start_of_day());
    let mut session = ReviewSession::new(&store, &clock, collection());
    session.start(ReviewQueue::build(items)).unwrap();

    for (answered, value) in [5, 1, 4].into_iter().enumerate() {
        assert_eq!(session.state(), SessionState::InProgress);
        let item = session.current_item().unwrap().clone();
        session.record_answer(&item, rating(value)).unwrap();
        assert_eq!(session.position(), answered + 1);
    }

    assert_eq!(session.state(), SessionState::Completed);
    assert_eq!(session.score(), 2);
    assert!(matches!(
        session.current_item(),
        Err(SessionError::NotInProgress)
    ));
}

#[test]
fn restarting_with_a_fresh_queue_reviews_again() {
    let items = overdue_items(&[("Peru", "Lima")]);
    let store = seeded_store(&items);
    let clock = FixedClock::new(start_of_day());
    let mut session = ReviewSession::new(&store, &clock, collection());

    session.start_from_store().unwrap();
    let item = session.current_item().unwrap().clone();
    session.record_answer(&item, rating(4)).unwrap();
    assert_eq!(session.state(), SessionState::Completed);

    clock.advance(Duration::days(1));
    session.start_from_store().unwrap();
    assert_eq!(session.score(), 0);
    let item = session.current_item().unwrap().clone();
    assert_eq!(item.interval, 1);

    let updated = session.record_answer(&item, rating(4)).unwrap();
    assert_eq!(updated.interval, 6);
    assert_eq!(
        updated.next_review_date,
        Some(start_of_day() + Duration::days(7))
    );
}

#[test]
fn typed_answer_then_override_counts_once() {
    let items = overdue_items(&[("Peru", "Lima"), ("Chile", "Santiago"), ("Kenya", "Nairobi")]);
    let store = seeded_store(&items);
    let clock = FixedClock::new(start_of_day());
    let mut session = ReviewSession::new(&store, &clock, collection());
    session.start(ReviewQueue::build(items)).unwrap();

    let verdict = session.judge_typed_answer("Lima, Peru").unwrap();
    assert!(!verdict.is_correct);

    let item = session.current_item().unwrap().clone();
    let updated = session.override_answer(&item).unwrap();
    assert_eq!(updated.interval, 1);
    assert_eq!(session.score(), 1);

    assert!(matches!(
        session.override_answer(&updated),
        Err(SessionError::AlreadyOverridden(0))
    ));
    assert_eq!(session.score(), 1);
    assert_eq!(session.current_item().unwrap().front, "Chile");
}

#[test]
fn items_outside_the_queue_survive_writes() {
    let items = overdue_items(&[("Peru", "Lima"), ("Chile", "Santiago"), ("Kenya", "Nairobi")]);
    let store = seeded_store(&items);
    let clock = FixedClock::new(start_of_day());
    let mut session = ReviewSession::new(&store, &clock, collection());

    // Only the oldest item is queued
    session.start(ReviewQueue::build(items[..1].to_vec())).unwrap();
    session.record_answer(&items[0], rating(3)).unwrap();

    let stored = store.load_items(&collection()).unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[1], items[1]);
    assert_eq!(stored[2], items[2]);
    assert_eq!(stored[0].interval, 1);
}
