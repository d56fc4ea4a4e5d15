// src/readers/mod.rs

//! "Readers" for _ntblib_.
//!
//! ## Overview of readers
//!
//! * A [`RecordStream`] drives a [`DecodedLines`] to derive decoded lines.
//! * A `RecordStream` passes each line to a [`RecordBuilder`] to derive
//!   [`BackupRecord`s].
//! * A `RecordBuilder` uses a [`LineMatcher`] to classify each line.
//!
//! <br/>
//!
//! * A `DecodedLines` only handles bytes and the log's text encoding.
//! * A `RecordBuilder` is a state machine, one cycle at a time.
//! * A `RecordStream` owns the values carried from one cycle to the next.
//!
//! A [`TopNTracker`] consumes `BackupRecord`s from a `RecordStream` and
//! keeps only the largest few by some metric.
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`BackupRecord`s]: crate::data::record::BackupRecord
//! [`DecodedLines`]: crate::readers::linesource::DecodedLines
//! [`LineMatcher`]: crate::readers::linematcher::LineMatcher
//! [`RecordBuilder`]: crate::readers::recordbuilder::RecordBuilder
//! [`RecordStream`]: crate::readers::recordstream::RecordStream
//! [`TopNTracker`]: crate::readers::topn::TopNTracker

pub mod linematcher;
pub mod linesource;
pub mod recordbuilder;
pub mod recordstream;
pub mod topn;
