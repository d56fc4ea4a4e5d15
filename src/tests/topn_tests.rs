// src/tests/topn_tests.rs

//! tests for `topn.rs`

#![allow(non_snake_case)]

use crate::data::datetime::Duration;
use crate::data::record::BackupRecord;
use crate::readers::topn::{Metric, TopNTracker, TopRecords, TOP_N_DEF};
use crate::tests::common::{dt, TS_0};

use ::test_case::test_case;

fn identity(val: &u32) -> u32 {
    *val
}

/// `(key, label)` items, ranked by key only
fn key_of(item: &(u32, &'static str)) -> u32 {
    item.0
}

/// deterministic pseudo-random sequence
fn lcg_sequence(count: usize) -> Vec<u32> {
    let mut state: u64 = 0x2545F491;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 1000) as u32
        })
        .collect()
}

#[test]
fn test_TopNTracker_new() {
    let tracker = TopNTracker::new(3, identity);
    assert_eq!(tracker.capacity(), 3);
    assert_eq!(tracker.len(), 0);
    assert!(tracker.is_empty());
    assert!(!tracker.is_full());
    assert_eq!(tracker.smallest(), None);
    assert_eq!(tracker.largest(), None);
    assert!(tracker.to_ranked_sequence().is_empty());
}

#[test]
fn test_TopNTracker_offer() {
    let mut tracker = TopNTracker::new(3, identity);
    assert!(tracker.offer(5));
    assert!(tracker.offer(1));
    assert!(tracker.offer(9));
    assert!(tracker.is_full());
    assert_eq!(tracker.to_ranked_sequence(), vec![&9, &5, &1]);
    // not more than the smallest
    assert!(!tracker.offer(0));
    assert!(!tracker.offer(1));
    assert!(tracker.offer(7));
    assert_eq!(tracker.to_ranked_sequence(), vec![&9, &7, &5]);
    assert_eq!(tracker.smallest(), Some(&5));
    assert_eq!(tracker.largest(), Some(&9));
    assert_eq!(tracker.len(), 3);
}

#[test]
fn test_TopNTracker_capacity_zero() {
    let mut tracker = TopNTracker::new(0, identity);
    assert!(tracker.is_full());
    assert!(!tracker.offer(1));
    assert!(!tracker.offer(u32::MAX));
    assert!(tracker.is_empty());
}

#[test_case(usize::MAX)]
#[test_case(1 << 60)]
fn test_TopNTracker_huge_capacity(capacity: usize) {
    let mut tracker = TopNTracker::new(capacity, identity);
    assert_eq!(tracker.capacity(), capacity);
    assert!(!tracker.is_full());
    for val in lcg_sequence(50) {
        assert!(tracker.offer(val));
    }
    assert_eq!(tracker.len(), 50);
    let ranked = tracker.to_ranked_sequence();
    assert!(ranked.windows(2).all(|w| w[0] >= w[1]), "not descending {:?}", ranked);
}

#[test]
fn test_TopRecords_huge_capacity() {
    let mut top = TopRecords::new(usize::MAX);
    top.offer(&record("/a", 1, 1, 1));
    assert_eq!(top.ranked(Metric::FileSize).len(), 1);
}

#[test]
fn test_TopNTracker_ties_keep_offered_order() {
    let mut tracker = TopNTracker::new(3, key_of);
    assert!(tracker.offer((2, "a")));
    assert!(tracker.offer((2, "b")));
    assert!(tracker.offer((2, "c")));
    // equal to the smallest, not kept
    assert!(!tracker.offer((2, "d")));
    let labels: Vec<&str> = tracker.iter().map(|item| item.1).collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
    // the earliest of the smallest is evicted
    assert!(tracker.offer((3, "e")));
    let labels: Vec<&str> = tracker.iter().map(|item| item.1).collect();
    assert_eq!(labels, vec!["b", "c", "e"]);
    let ranked: Vec<&str> = tracker.into_ranked_vec().into_iter().map(|item| item.1).collect();
    assert_eq!(ranked, vec!["e", "c", "b"]);
}

#[test_case(1)]
#[test_case(5)]
#[test_case(30)]
#[test_case(500)]
fn test_TopNTracker_matches_sort(capacity: usize) {
    let sequence = lcg_sequence(200);
    let mut tracker = TopNTracker::new(capacity, identity);
    for (i, val) in sequence.iter().enumerate() {
        tracker.offer(*val);
        assert_eq!(tracker.len(), capacity.min(i + 1));
        let held: Vec<&u32> = tracker.iter().collect();
        assert!(held.windows(2).all(|w| w[0] <= w[1]), "not ascending {:?}", held);
    }
    let mut expect: Vec<u32> = sequence.clone();
    expect.sort_unstable_by(|a, b| b.cmp(a));
    expect.truncate(capacity);
    assert_eq!(tracker.into_ranked_vec(), expect);
}

#[test]
fn test_TopNTracker_offer_cloned() {
    let mut tracker = TopNTracker::new(2, |s: &String| s.len());
    let a = String::from("aaa");
    let b = String::from("b");
    let c = String::from("cc");
    assert!(tracker.offer_cloned(&a));
    assert!(tracker.offer_cloned(&b));
    assert!(tracker.offer_cloned(&c));
    assert!(!tracker.offer_cloned(&b));
    assert_eq!(tracker.to_ranked_sequence(), vec![&a, &c]);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TopRecords
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// record with the given size, duration and idle time
fn record(
    path: &str,
    size: u64,
    duration_ms: i64,
    idle_ms: i64,
) -> BackupRecord {
    let begin = dt(TS_0);
    let end = begin + Duration::try_milliseconds(duration_ms).unwrap();
    BackupRecord::new(
        String::from(path),
        size,
        Duration::try_milliseconds(idle_ms).unwrap(),
        begin,
        end,
    )
}

fn paths(records: &[&BackupRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.file_path().to_string())
        .collect()
}

#[test]
fn test_TopRecords_ranked() {
    let mut top = TopRecords::new(2);
    assert_eq!(top.capacity(), 2);
    top.offer(&record("/a", 300, 10, 5000));
    top.offer(&record("/b", 100, 30, 0));
    top.offer(&record("/c", 200, 20, 100));

    assert_eq!(paths(&top.ranked(Metric::Duration)), vec!["/b", "/c"]);
    assert_eq!(paths(&top.ranked(Metric::FileSize)), vec!["/a", "/c"]);
    assert_eq!(paths(&top.ranked(Metric::IdleBeforeBof)), vec!["/a", "/c"]);
}

#[test]
fn test_TopRecords_default() {
    let top = TopRecords::default();
    assert_eq!(top.capacity(), TOP_N_DEF);
    for metric in Metric::ALL.iter() {
        assert!(top.ranked(*metric).is_empty());
    }
}

#[test]
fn test_Metric_title() {
    assert_eq!(Metric::Duration.to_string(), "Transfer duration");
    assert_eq!(Metric::FileSize.title(), "File size");
    assert_eq!(Metric::IdleBeforeBof.title(), "Idle time before BOF");
}
