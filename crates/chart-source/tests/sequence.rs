// File: crates/chart-source/tests/sequence.rs
// Purpose: Latest-request-wins ordering, including responses racing across threads.

use std::sync::Arc;
use std::thread;

use chart_source::RequestSequencer;

#[test]
fn only_the_latest_ticket_is_applied() {
    let seq = RequestSequencer::new();
    assert!(seq.latest().is_none());
    let first = seq.issue();
    let second = seq.issue();
    assert!(second > first);

    let mut slot = None;
    assert!(seq.accept(second, "2021", &mut slot));
    // The older response arrives last and is dropped.
    assert!(!seq.accept(first, "2020", &mut slot));
    assert_eq!(slot, Some("2021"));
    assert_eq!(seq.latest(), Some(second));
}

#[test]
fn invalidate_discards_outstanding_requests() {
    let seq = RequestSequencer::new();
    let t = seq.issue();
    seq.invalidate();
    let mut slot: Option<u32> = None;
    assert!(!seq.is_current(t));
    assert!(!seq.accept(t, 1, &mut slot));
    assert!(slot.is_none());

    // New requests after teardown work again.
    let t2 = seq.issue();
    assert!(seq.accept(t2, 2, &mut slot));
    assert_eq!(slot, Some(2));
}

#[test]
fn tickets_are_unique_across_threads() {
    let seq = Arc::new(RequestSequencer::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let seq = Arc::clone(&seq);
            thread::spawn(move || (0..100).map(|_| seq.issue().seq()).collect::<Vec<_>>())
        })
        .collect();
    let mut all: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), 800);
    assert_eq!(seq.latest().unwrap().seq(), 800);
}
