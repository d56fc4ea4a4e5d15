// src/data/mod.rs

//! The `data` module is specialized data containers and value decoders for
//! [`BackupRecord`]s.
//!
//! ## Definitions of data
//!
//! ### Cycle
//!
//! A "cycle" is a sequence of log lines that:
//!
//! * begins with a `BOF` event line.
//! * has a `<File>` event line with the path and the encoded size of the
//!   backed-up file.
//! * ends with a `BackupArchiveDetail:` event line.
//!
//! Any number of other lines may be interleaved within a cycle.
//!
//! ### BackupRecord
//!
//! A [`BackupRecord`] is the timing and size information of one completed
//! cycle. It is found by a [`RecordBuilder`] and yielded by a
//! [`RecordStream`].
//!
//! ### Encoded size
//!
//! The file size on a `<File>` line is written as `high|low`, the two halves
//! of the Windows `WIN32_FIND_DATA` fields `nFileSizeHigh` and
//! `nFileSizeLow`. See [`filesize`].
//!
//! [`BackupRecord`]: crate::data::record::BackupRecord
//! [`RecordBuilder`]: crate::readers::recordbuilder::RecordBuilder
//! [`RecordStream`]: crate::readers::recordstream::RecordStream
//! [`filesize`]: crate::data::filesize

pub mod datetime;
pub mod filesize;
pub mod record;
pub mod stats;
