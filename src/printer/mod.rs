// src/printer/mod.rs

//! The `printer` module is for writing user-facing reports of
//! [`BackupRecord`s]: a CSV export of every record, and an HTML table of the
//! top records by each metric.
//!
//! [`BackupRecord`s]: crate::data::record::BackupRecord

pub mod csvwriter;
pub mod htmlreport;
