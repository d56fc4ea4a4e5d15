// src/lib.rs

//! _ntblib_ extracts backup-job records from a backup agent job log.
//!
//! A backup agent writes one "cycle" of log lines per file it backs up.
//! A [`RecordStream`] drives decoded log lines through a [`LineMatcher`]
//! and a [`RecordBuilder`] to derive [`BackupRecord`]s, one per cycle.
//! Consumers of the record stream, like a [`TopRecords`] or a
//! [`CsvRecordWriter`], see each completed record exactly once, in log order.
//!
//! The _ntbl_ binary program drives one `RecordStream` per log file.
//!
//! [`RecordStream`]: crate::readers::recordstream::RecordStream
//! [`LineMatcher`]: crate::readers::linematcher::LineMatcher
//! [`RecordBuilder`]: crate::readers::recordbuilder::RecordBuilder
//! [`BackupRecord`]: crate::data::record::BackupRecord
//! [`TopRecords`]: crate::readers::topn::TopRecords
//! [`CsvRecordWriter`]: crate::printer::csvwriter::CsvRecordWriter

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
