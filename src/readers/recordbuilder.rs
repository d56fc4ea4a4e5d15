// src/readers/recordbuilder.rs

//! Implements a [`RecordBuilder`], the state machine that assembles one
//! [`BackupRecord`] per cycle of job log lines.
//!
//! ```text
//!                 BOF                       BackupArchiveDetail:
//! AwaitingBof ─────────▶ InRecord ─────────────────────────────▶ (record complete)
//!      ▲                  │  ▲  │                                        │
//!      │                  │  └──┘ BOF (restart), <File>, other lines      │
//!      │                  │                                               │
//!      └──────────────────┴───────────────────────────────────────────────┘
//!               build failure                     back to AwaitingBof
//! ```
//!
//! Lines that are not one of the three events are ignored in any state.
//!
//! [`BackupRecord`]: crate::data::record::BackupRecord

use crate::common::{Count, FileSz, ResultS3};
use crate::data::datetime::{
    datetime_parse_from_str,
    local_offset,
    DateTimeL,
    DateTimeLOpt,
    Duration,
    FixedOffset,
};
use crate::data::filesize::parse_file_payload;
use crate::data::record::{BackupRecord, BuildFailure};
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::linematcher::{EventKind, LineMatch, LineMatcher};

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Result of [`RecordBuilder::process_line`].
///
/// * `Found(record)`: the line closed a cycle and completed `record`.
/// * `Done`: no record completed by this line.
/// * `Err(failure)`: the in-progress cycle was abandoned.
pub type ResultS3RecordBuild = ResultS3<BackupRecord, BuildFailure>;

/// A cycle begun by a `BOF` line and not yet closed.
#[derive(Clone, Debug)]
struct PendingRecord {
    begin_time: DateTimeL,
    idle_before_bof: Duration,
    /// path and size from the most recent `<File>` line of this cycle
    file: Option<(String, FileSz)>,
}

#[derive(Clone, Debug, Default)]
enum BuilderState {
    #[default]
    AwaitingBof,
    InRecord(PendingRecord),
}

/// Public view of the [`RecordBuilder`] state.
///
/// There is no "complete" phase. A completed record is returned immediately
/// and the builder is `AwaitingBof` again.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuilderPhase {
    AwaitingBof,
    InRecord,
}

/// Counts of what a [`RecordBuilder`] did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SummaryRecordBuilder {
    /// lines classified as one of the event lines
    pub lines_matched: Count,
    /// records returned as `Found`
    pub records_completed: Count,
    /// cycles replaced by a later `BOF` before they closed
    pub records_superseded: Count,
    /// cycles abandoned due to a [`BuildFailure`]
    pub records_failed: Count,
    /// cycles discarded by [`RecordBuilder::discard_in_progress`]
    pub records_discarded: Count,
}

impl fmt::Display for SummaryRecordBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "event lines {}, records completed {}, superseded {}, failed {}, discarded {}",
            self.lines_matched,
            self.records_completed,
            self.records_superseded,
            self.records_failed,
            self.records_discarded,
        )
    }
}

/// Consumes log lines, one at a time, in log order, and returns a
/// [`BackupRecord`] at the close of each well-formed cycle.
///
/// The end time of the previous record is not held by the `RecordBuilder`.
/// It is passed in by the caller, see [`process_line`].
///
/// A `BOF` during a cycle starts a new cycle in place of the unfinished one.
/// The log has no cancel marker so the last `BOF` wins.
///
/// [`process_line`]: RecordBuilder::process_line
pub struct RecordBuilder {
    matcher: LineMatcher,
    tz_offset: FixedOffset,
    state: BuilderState,
    summary: SummaryRecordBuilder,
}

impl fmt::Debug for RecordBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RecordBuilder")
            .field("years", self.matcher.years())
            .field("tz_offset", &self.tz_offset)
            .field("state", &self.state)
            .field("summary", &self.summary)
            .finish()
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        RecordBuilder::new(LineMatcher::default(), local_offset())
    }
}

impl RecordBuilder {
    /// Event line timestamps are interpreted at `tz_offset`.
    pub fn new(
        matcher: LineMatcher,
        tz_offset: FixedOffset,
    ) -> RecordBuilder {
        RecordBuilder {
            matcher,
            tz_offset,
            state: BuilderState::AwaitingBof,
            summary: SummaryRecordBuilder::default(),
        }
    }

    pub fn phase(&self) -> BuilderPhase {
        match self.state {
            BuilderState::AwaitingBof => BuilderPhase::AwaitingBof,
            BuilderState::InRecord(_) => BuilderPhase::InRecord,
        }
    }

    pub fn is_in_record(&self) -> bool {
        matches!(self.state, BuilderState::InRecord(_))
    }

    pub const fn summary(&self) -> SummaryRecordBuilder {
        self.summary
    }

    /// Process the next `line` of the log.
    ///
    /// `previous_end_time` is the end time of the most recent closed cycle
    /// of this log, or `None` if there has been none. It is read at a `BOF`
    /// and updated when a cycle closes.
    pub fn process_line(
        &mut self,
        line: &str,
        previous_end_time: &mut DateTimeLOpt,
    ) -> ResultS3RecordBuild {
        let linematch: LineMatch = match self.matcher.match_line(line) {
            Some(linematch) => linematch,
            None => return ResultS3::Done,
        };
        self.summary.lines_matched += 1;

        match linematch.event {
            EventKind::Bof => self.process_bof(&linematch, previous_end_time),
            EventKind::File => self.process_file(&linematch),
            EventKind::BackupArchiveDetail => self.process_end(&linematch, previous_end_time),
        }
    }

    /// End of input. A cycle still in progress is dropped, never returned
    /// partially. Returns `true` if a cycle was dropped.
    pub fn discard_in_progress(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            BuilderState::InRecord(_pending) => {
                defñ!("discard unfinished cycle begun {}", _pending.begin_time);
                self.summary.records_discarded += 1;
                true
            }
            BuilderState::AwaitingBof => false,
        }
    }

    /// Abandon the current cycle, if any.
    fn fail(
        &mut self,
        failure: BuildFailure,
    ) -> ResultS3RecordBuild {
        de_wrn!("RecordBuilder: {}", failure);
        self.state = BuilderState::AwaitingBof;
        self.summary.records_failed += 1;

        ResultS3::Err(failure)
    }

    fn process_bof(
        &mut self,
        linematch: &LineMatch,
        previous_end_time: &DateTimeLOpt,
    ) -> ResultS3RecordBuild {
        if let BuilderState::InRecord(_pending) = &self.state {
            defo!("BOF {} supersedes cycle begun {}", linematch.timestamp, _pending.begin_time);
            self.summary.records_superseded += 1;
            self.state = BuilderState::AwaitingBof;
        }
        let begin_time: DateTimeL = match datetime_parse_from_str(linematch.timestamp, &self.tz_offset) {
            Some(dt) => dt,
            None => return self.fail(BuildFailure::InvalidTimestamp(linematch.timestamp.to_string())),
        };
        let idle_before_bof: Duration = match previous_end_time {
            Some(previous_end_time) => begin_time - *previous_end_time,
            None => Duration::zero(),
        };
        self.state = BuilderState::InRecord(PendingRecord {
            begin_time,
            idle_before_bof,
            file: None,
        });

        ResultS3::Done
    }

    fn process_file(
        &mut self,
        linematch: &LineMatch,
    ) -> ResultS3RecordBuild {
        if !self.is_in_record() {
            defñ!("ignore <File> outside of a cycle");
            return ResultS3::Done;
        }
        match parse_file_payload(linematch.payload) {
            Ok(file) => {
                if let BuilderState::InRecord(pending) = &mut self.state {
                    pending.file = Some(file);
                }
                ResultS3::Done
            }
            Err(failure) => self.fail(failure),
        }
    }

    fn process_end(
        &mut self,
        linematch: &LineMatch,
        previous_end_time: &mut DateTimeLOpt,
    ) -> ResultS3RecordBuild {
        let pending: PendingRecord = match std::mem::take(&mut self.state) {
            BuilderState::InRecord(pending) => pending,
            BuilderState::AwaitingBof => {
                defñ!("ignore BackupArchiveDetail: outside of a cycle");
                return ResultS3::Done;
            }
        };
        let end_time: DateTimeL = match datetime_parse_from_str(linematch.timestamp, &self.tz_offset) {
            Some(dt) => dt,
            None => return self.fail(BuildFailure::InvalidTimestamp(linematch.timestamp.to_string())),
        };
        // the cycle is bracketed so its end is the reference for the next
        // cycle's idle time even if this record fails
        *previous_end_time = Some(end_time);
        let (file_path, file_size) = match pending.file {
            Some(file) => file,
            None => return self.fail(BuildFailure::MissingFileLine),
        };
        self.summary.records_completed += 1;
        let record = BackupRecord::new(
            file_path,
            file_size,
            pending.idle_before_bof,
            pending.begin_time,
            end_time,
        );
        defo!("completed {:?}", record);

        ResultS3::Found(record)
    }
}
