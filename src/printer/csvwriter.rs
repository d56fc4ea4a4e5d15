// src/printer/csvwriter.rs

//! Implements a [`CsvRecordWriter`], writing [`BackupRecord`]s as CSV rows
//! with the [`csv`] crate.
//!
//! ```text
//! file_path,file_size,idle_before_bof,begin_time,end_time,duration
//! E:\data\report.xls,8684,0.000,2018-02-17 02:31:25.577,2018-02-17 02:31:25.601,0.024
//! ```

use crate::common::Count;
use crate::data::datetime::{datetime_to_string, duration_to_seconds_string};
use crate::data::record::BackupRecord;

use std::io::{Error, ErrorKind, Result, Write};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Map a [`csv::Error`] to an [`Error`].
fn csv_error_to_io(err: ::csv::Error) -> Error {
    if err.is_io_error() {
        if let ::csv::ErrorKind::Io(err_io) = err.into_kind() {
            return err_io;
        }
        return Error::new(ErrorKind::Other, "csv I/O error");
    }

    Error::new(ErrorKind::InvalidData, err.to_string())
}

/// Writes a header row then one row per [`BackupRecord`].
///
/// Fields with a `,`, `"` or line break, e.g. some file paths, are quoted.
pub struct CsvRecordWriter<W: Write> {
    writer: ::csv::Writer<W>,
    rows: Count,
}

impl<W: Write> CsvRecordWriter<W> {
    /// Create a `CsvRecordWriter` and write the header row.
    pub fn new(writer: W) -> Result<CsvRecordWriter<W>> {
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer
            .write_record(BackupRecord::CSV_HEADER)
            .map_err(csv_error_to_io)?;

        Ok(CsvRecordWriter { writer, rows: 0 })
    }

    /// Count of records written, not counting the header row.
    pub const fn rows(&self) -> Count {
        self.rows
    }

    pub fn write(
        &mut self,
        record: &BackupRecord,
    ) -> Result<()> {
        let file_size: String = record.file_size().to_string();
        let idle_before_bof: String = duration_to_seconds_string(&record.idle_before_bof());
        let begin_time: String = datetime_to_string(record.begin_time());
        let end_time: String = datetime_to_string(record.end_time());
        let duration: String = duration_to_seconds_string(&record.duration());
        self.writer
            .write_record([
                record.file_path(),
                file_size.as_str(),
                idle_before_bof.as_str(),
                begin_time.as_str(),
                end_time.as_str(),
                duration.as_str(),
            ])
            .map_err(csv_error_to_io)?;
        self.rows += 1;

        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        defñ!("into_inner() after {} rows", self.rows);
        self.writer
            .into_inner()
            .map_err(|err| err.into_error())
    }
}
