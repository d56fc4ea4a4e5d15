// src/readers/topn.rs

//! Implements a [`TopNTracker`], a bounded sorted collection that keeps the
//! `N` largest items offered by some metric, and [`TopRecords`], three
//! trackers of [`BackupRecord`]s fed from one pass of a record stream.
//!
//! [`BackupRecord`]: crate::data::record::BackupRecord

use crate::common::FileSz;
use crate::data::datetime::Duration;
use crate::data::record::BackupRecord;

use std::fmt;

use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Default capacity of a [`TopRecords`] tracker.
pub const TOP_N_DEF: usize = 30;

/// Keeps up to `capacity` items, sorted ascending by `metric(item)`.
///
/// Items with equal metric keep their offered order. An item whose metric is
/// not more than the smallest held metric is not kept once the tracker is
/// full.
pub struct TopNTracker<T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    /// `(metric(item), item)` sorted ascending by metric
    entries: Vec<(K, T)>,
    capacity: usize,
    metric: F,
}

impl<T, K, F> fmt::Debug for TopNTracker<T, K, F>
where
    T: fmt::Debug,
    K: Ord + fmt::Debug,
    F: Fn(&T) -> K,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TopNTracker")
            .field("capacity", &self.capacity)
            .field("entries", &self.entries)
            .finish()
    }
}

impl<T, K, F> TopNTracker<T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    /// `capacity` is not allocated up front; `entries` grows as items are
    /// kept.
    pub fn new(
        capacity: usize,
        metric: F,
    ) -> TopNTracker<T, K, F> {
        TopNTracker {
            entries: Vec::new(),
            capacity,
            metric,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Would an item with metric `key` be kept?
    fn accepts(
        &self,
        key: &K,
    ) -> bool {
        if !self.is_full() {
            return self.capacity != 0;
        }
        match self.entries.first() {
            Some((smallest, _)) => key > smallest,
            None => false,
        }
    }

    /// Insert `item` keeping ascending order, after any equal metrics.
    /// If full, the smallest item is evicted first.
    fn insert(
        &mut self,
        key: K,
        item: T,
    ) {
        if self.is_full() {
            self.entries.remove(0);
        }
        let at: usize = self.entries.partition_point(|(key_, _)| *key_ <= key);
        self.entries.insert(at, (key, item));
        debug_assert_le!(self.entries.len(), self.capacity, "too many entries");
    }

    /// Offer `item`. Returns `true` if it was kept.
    pub fn offer(
        &mut self,
        item: T,
    ) -> bool {
        let key: K = (self.metric)(&item);
        if !self.accepts(&key) {
            return false;
        }
        self.insert(key, item);

        true
    }

    /// Offer a clone of `item`; `item` is only cloned if it is kept.
    pub fn offer_cloned(
        &mut self,
        item: &T,
    ) -> bool
    where
        T: Clone,
    {
        let key: K = (self.metric)(item);
        if !self.accepts(&key) {
            return false;
        }
        self.insert(key, item.clone());

        true
    }

    /// The item with the smallest metric.
    pub fn smallest(&self) -> Option<&T> {
        self.entries.first().map(|(_, item)| item)
    }

    /// The item with the largest metric. Among equals, the last offered.
    pub fn largest(&self) -> Option<&T> {
        self.entries.last().map(|(_, item)| item)
    }

    /// Items in ascending metric order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.entries.iter().map(|(_, item)| item)
    }

    /// Items in descending metric order, largest first, for reporting.
    pub fn to_ranked_sequence(&self) -> Vec<&T> {
        self.iter().rev().collect()
    }

    /// Consume the tracker; items in descending metric order.
    pub fn into_ranked_vec(self) -> Vec<T> {
        self.entries
            .into_iter()
            .rev()
            .map(|(_, item)| item)
            .collect()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TopRecords
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The metrics a [`BackupRecord`] is ranked by.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Metric {
    Duration,
    FileSize,
    IdleBeforeBof,
}

impl Metric {
    /// In report order.
    pub const ALL: [Metric; 3] = [
        Metric::Duration,
        Metric::FileSize,
        Metric::IdleBeforeBof,
    ];

    pub const fn title(&self) -> &'static str {
        match self {
            Metric::Duration => "Transfer duration",
            Metric::FileSize => "File size",
            Metric::IdleBeforeBof => "Idle time before BOF",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

fn metric_duration(record: &BackupRecord) -> Duration {
    record.duration()
}

fn metric_file_size(record: &BackupRecord) -> FileSz {
    record.file_size()
}

fn metric_idle_before_bof(record: &BackupRecord) -> Duration {
    record.idle_before_bof()
}

/// A [`TopNTracker`] of [`BackupRecord`]s.
pub type RecordTracker<K> = TopNTracker<BackupRecord, K, fn(&BackupRecord) -> K>;

/// Top records by each [`Metric`], all with the same capacity.
#[derive(Debug)]
pub struct TopRecords {
    durations: RecordTracker<Duration>,
    file_sizes: RecordTracker<FileSz>,
    idles_before_bof: RecordTracker<Duration>,
}

impl Default for TopRecords {
    fn default() -> Self {
        TopRecords::new(TOP_N_DEF)
    }
}

impl TopRecords {
    pub fn new(capacity: usize) -> TopRecords {
        defñ!("TopRecords::new({})", capacity);
        TopRecords {
            durations: TopNTracker::new(capacity, metric_duration as fn(&BackupRecord) -> Duration),
            file_sizes: TopNTracker::new(capacity, metric_file_size as fn(&BackupRecord) -> FileSz),
            idles_before_bof: TopNTracker::new(capacity, metric_idle_before_bof as fn(&BackupRecord) -> Duration),
        }
    }

    pub fn capacity(&self) -> usize {
        self.durations.capacity()
    }

    /// Offer `record` to every tracker.
    pub fn offer(
        &mut self,
        record: &BackupRecord,
    ) {
        self.durations.offer_cloned(record);
        self.file_sizes.offer_cloned(record);
        self.idles_before_bof.offer_cloned(record);
    }

    /// Records for `metric`, largest first.
    pub fn ranked(
        &self,
        metric: Metric,
    ) -> Vec<&BackupRecord> {
        match metric {
            Metric::Duration => self.durations.to_ranked_sequence(),
            Metric::FileSize => self.file_sizes.to_ranked_sequence(),
            Metric::IdleBeforeBof => self.idles_before_bof.to_ranked_sequence(),
        }
    }
}
