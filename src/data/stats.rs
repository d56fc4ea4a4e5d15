// src/data/stats.rs

//! Implements [`RecordStats`], running totals and maximums over a
//! sequence of [`BackupRecord`]s.

use crate::common::Count;
use crate::data::datetime::{
    datetime_to_string,
    duration_to_seconds_string,
    Duration,
};
use crate::data::record::BackupRecord;

use std::fmt;

/// Totals and maximums over all records of one log.
///
/// Maximums keep the earliest record on ties.
#[derive(Clone, Debug)]
pub struct RecordStats {
    pub count: Count,
    /// `u128` since many large files may sum past `u64::MAX`
    pub total_size: u128,
    pub total_idle_before_bof: Duration,
    pub total_duration: Duration,
    pub max_size: Option<BackupRecord>,
    /// record with the longest idle time before its `BOF`
    pub max_idle_before_bof: Option<BackupRecord>,
    pub max_duration: Option<BackupRecord>,
    /// record with the largest [`throughput_per_minute`]
    ///
    /// [`throughput_per_minute`]: BackupRecord::throughput_per_minute
    pub max_throughput: Option<BackupRecord>,
}

impl Default for RecordStats {
    fn default() -> Self {
        RecordStats {
            count: 0,
            total_size: 0,
            total_idle_before_bof: Duration::zero(),
            total_duration: Duration::zero(),
            max_size: None,
            max_idle_before_bof: None,
            max_duration: None,
            max_throughput: None,
        }
    }
}

impl RecordStats {
    pub fn new() -> RecordStats {
        RecordStats::default()
    }

    pub fn add(
        &mut self,
        record: &BackupRecord,
    ) {
        self.count += 1;
        self.total_size += record.file_size() as u128;
        self.total_idle_before_bof = self.total_idle_before_bof + record.idle_before_bof();
        self.total_duration = self.total_duration + record.duration();

        if self.max_size.as_ref().map_or(true, |max| record.file_size() > max.file_size()) {
            self.max_size = Some(record.clone());
        }
        if self.max_idle_before_bof.as_ref().map_or(true, |max| record.idle_before_bof() > max.idle_before_bof()) {
            self.max_idle_before_bof = Some(record.clone());
        }
        if self.max_duration.as_ref().map_or(true, |max| record.duration() > max.duration()) {
            self.max_duration = Some(record.clone());
        }
        if let Some(throughput) = record.throughput_per_minute() {
            let greater: bool = match self.max_throughput.as_ref().and_then(BackupRecord::throughput_per_minute) {
                Some(max) => throughput > max,
                None => true,
            };
            if greater {
                self.max_throughput = Some(record.clone());
            }
        }
    }
}

fn fmt_record_opt(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    record: &Option<BackupRecord>,
) -> fmt::Result {
    match record {
        Some(record) => writeln!(
            f,
            "{:<18}: {} bytes in {} s at {} {:?}",
            label,
            record.file_size(),
            duration_to_seconds_string(&record.duration()),
            datetime_to_string(record.begin_time()),
            record.file_path(),
        ),
        None => writeln!(f, "{:<18}: (none)", label),
    }
}

impl fmt::Display for RecordStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<18}: {}", "records", self.count)?;
        writeln!(f, "{:<18}: {}", "total_size", self.total_size)?;
        writeln!(f, "{:<18}: {}", "total_before_bof", duration_to_seconds_string(&self.total_idle_before_bof))?;
        writeln!(f, "{:<18}: {}", "total_duration", duration_to_seconds_string(&self.total_duration))?;
        fmt_record_opt(f, "max_size", &self.max_size)?;
        match &self.max_idle_before_bof {
            Some(record) => writeln!(
                f,
                "{:<18}: {} s before {} {:?}",
                "max_before_bof",
                duration_to_seconds_string(&record.idle_before_bof()),
                datetime_to_string(record.begin_time()),
                record.file_path(),
            )?,
            None => writeln!(f, "{:<18}: (none)", "max_before_bof")?,
        }
        fmt_record_opt(f, "max_duration", &self.max_duration)?;
        if let Some(throughput) = self.max_throughput.as_ref().and_then(BackupRecord::throughput_per_minute) {
            writeln!(f, "{:<18}: {:.1} byte/min", "max_throughput", throughput)?;
        }
        fmt_record_opt(f, "max_throughput_at", &self.max_throughput)
    }
}
