// src/data/record.rs

//! Implements a [`BackupRecord`] struct and the [`BuildFailure`] reasons a
//! cycle does not become a `BackupRecord`.

use crate::common::FileSz;
use crate::data::datetime::{
    duration_to_seconds_f64,
    DateTimeL,
    Duration,
};

use std::fmt;

// ------------
// BackupRecord

/// Timing and size of one backed-up file, taken from one completed cycle of
/// the job log.
///
/// A `BackupRecord` is only created by a [`RecordBuilder`] after the
/// cycle's closing `BackupArchiveDetail:` line. It is not changed after.
///
/// `end_time` may be before `begin_time` if the log has a clock anomaly.
/// Then `duration` is negative. It is not clamped.
///
/// [`RecordBuilder`]: crate::readers::recordbuilder::RecordBuilder
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackupRecord {
    file_path: String,
    file_size: FileSz,
    /// time between the prior record's `end_time` and this `begin_time`
    idle_before_bof: Duration,
    begin_time: DateTimeL,
    end_time: DateTimeL,
    /// `end_time - begin_time`
    duration: Duration,
}

impl BackupRecord {
    /// Column names for CSV output, in field order.
    pub const CSV_HEADER: [&'static str; 6] = [
        "file_path",
        "file_size",
        "idle_before_bof",
        "begin_time",
        "end_time",
        "duration",
    ];

    pub fn new(
        file_path: String,
        file_size: FileSz,
        idle_before_bof: Duration,
        begin_time: DateTimeL,
        end_time: DateTimeL,
    ) -> BackupRecord {
        debug_assert!(!file_path.is_empty(), "empty file_path");
        let duration: Duration = end_time - begin_time;

        BackupRecord {
            file_path,
            file_size,
            idle_before_bof,
            begin_time,
            end_time,
            duration,
        }
    }

    pub fn file_path(&self) -> &str {
        self.file_path.as_str()
    }

    pub const fn file_size(&self) -> FileSz {
        self.file_size
    }

    pub const fn idle_before_bof(&self) -> Duration {
        self.idle_before_bof
    }

    pub const fn begin_time(&self) -> &DateTimeL {
        &self.begin_time
    }

    pub const fn end_time(&self) -> &DateTimeL {
        &self.end_time
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Bytes transferred per minute.
    ///
    /// `None` if the `duration` is zero or negative.
    pub fn throughput_per_minute(&self) -> Option<f64> {
        let seconds: f64 = duration_to_seconds_f64(&self.duration);
        if seconds <= 0.0 {
            return None;
        }

        Some((self.file_size as f64 * 60.0) / seconds)
    }
}

// ------------
// BuildFailure

/// Why a cycle was abandoned by the [`RecordBuilder`].
///
/// A failure only drops the one cycle. Scanning continues at the next `BOF`.
///
/// [`RecordBuilder`]: crate::readers::recordbuilder::RecordBuilder
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildFailure {
    /// A `<File>` line payload without a parseable `size = high|low` suffix.
    MalformedSizePayload(String),
    /// An event line timestamp that is not a real date and time.
    InvalidTimestamp(String),
    /// The cycle closed before any `<File>` line.
    MissingFileLine,
}

impl fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildFailure::MalformedSizePayload(payload) => {
                write!(f, "malformed size payload {:?}", payload)
            }
            BuildFailure::InvalidTimestamp(timestamp) => {
                write!(f, "invalid timestamp {:?}", timestamp)
            }
            BuildFailure::MissingFileLine => {
                write!(f, "cycle closed without a <File> line")
            }
        }
    }
}

impl std::error::Error for BuildFailure {}
