// src/readers/recordstream.rs

//! Implements a [`RecordStream`], the driver of a line source through a
//! [`RecordBuilder`].

use crate::common::{Count, FPath, File, ResultS3};
use crate::data::datetime::{
    local_offset,
    DateTimeLOpt,
    FixedOffset,
    YearRange,
};
use crate::data::record::BackupRecord;
#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::linematcher::LineMatcher;
use crate::readers::linesource::{DecodedLines, LineSource, LogEncoding};
use crate::readers::recordbuilder::{RecordBuilder, SummaryRecordBuilder};

use std::fmt;
use std::io::{Error, ErrorKind, Result};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Settings for reading one log.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StreamConfig {
    /// used unless the log begins with a byte-order mark
    pub encoding: LogEncoding,
    /// years accepted on event line timestamps
    pub years: YearRange,
    /// timezone offset of the log timestamps
    pub tz_offset: FixedOffset,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            encoding: LogEncoding::default(),
            years: YearRange::default(),
            tz_offset: local_offset(),
        }
    }
}

/// Accumulated statistics about one [`RecordStream`].
///
/// For CLI option `--summary`.
#[derive(Clone, Debug, Default)]
pub struct SummaryRecordStream {
    pub path: FPath,
    pub lines_read: Count,
    pub builder: SummaryRecordBuilder,
    /// the log ended during a cycle (0 or 1)
    pub records_truncated: Count,
    /// first build failure, as a `String`
    pub first_failure: Option<String>,
    /// the source returned an error
    pub error: Option<String>,
    /// bytes invalid for the encoding were decoded as U+FFFD
    pub decode_replacements: bool,
}

impl fmt::Display for SummaryRecordStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.path)?;
        writeln!(f, "   lines read        : {}", self.lines_read)?;
        writeln!(f, "   {}", self.builder)?;
        writeln!(f, "   records truncated : {}", self.records_truncated)?;
        if let Some(failure) = &self.first_failure {
            writeln!(f, "   first failure     : {}", failure)?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "   error             : {}", error)?;
        }
        if self.decode_replacements {
            writeln!(f, "   invalid encoding  : bytes replaced with U+FFFD")?;
        }

        Ok(())
    }
}

/// A lazy, forward-only sequence of [`BackupRecord`]s from one log.
///
/// Each item is a completed record, in log order, or the one `Error` from
/// the underlying line source after which the stream is finished.
///
/// The line source is released when the `RecordStream` is dropped or
/// [`close`]d, including on early termination.
/// To read a log again, open a new `RecordStream`.
///
/// The end time of the previous record is owned here and passed into the
/// [`RecordBuilder`]. It starts as `None` so the first record of a stream
/// has zero `idle_before_bof`.
///
/// [`close`]: RecordStream::close
pub struct RecordStream<L>
where
    L: LineSource,
{
    path: FPath,
    lines: L,
    builder: RecordBuilder,
    previous_end_time: DateTimeLOpt,
    lines_read: Count,
    records_truncated: Count,
    first_failure: Option<String>,
    error: Option<String>,
    finished: bool,
}

/// A [`RecordStream`] of a log file.
pub type FileRecordStream = RecordStream<DecodedLines<File>>;

impl<L> fmt::Debug for RecordStream<L>
where
    L: LineSource,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RecordStream")
            .field("path", &self.path)
            .field("builder", &self.builder)
            .field("previous_end_time", &self.previous_end_time)
            .field("lines_read", &self.lines_read)
            .field("finished", &self.finished)
            .finish()
    }
}

impl FileRecordStream {
    /// Open the log file at `path`.
    ///
    /// A file that cannot be opened, or is a directory, is an `Error`.
    /// Nothing is read until the first call to `next`.
    pub fn open(
        path: &FPath,
        config: &StreamConfig,
    ) -> Result<FileRecordStream> {
        defn!("open({:?}, {:?})", path, config);
        let file: File = match File::open(path) {
            Ok(val) => val,
            Err(err) => {
                defx!("File::open({:?}) error {}", path, err);
                return Err(Error::new(err.kind(), format!("{} for file {:?}", err, path)));
            }
        };
        let metadata = file.metadata()?;
        if metadata.is_dir() {
            defx!("{:?} is a directory", path);
            return Err(Error::new(ErrorKind::InvalidInput, format!("Path is a directory {:?}", path)));
        }
        let lines = DecodedLines::new(file, config.encoding);
        let mut stream = RecordStream::from_lines(lines, config);
        stream.path = path.clone();
        defx!();

        Ok(stream)
    }
}

impl<L> RecordStream<L>
where
    L: LineSource,
{
    /// Create a `RecordStream` over any source of decoded `lines`.
    /// `config.encoding` is not used.
    pub fn from_lines(
        lines: L,
        config: &StreamConfig,
    ) -> RecordStream<L> {
        RecordStream {
            path: FPath::new(),
            lines,
            builder: RecordBuilder::new(LineMatcher::new(config.years), config.tz_offset),
            previous_end_time: None,
            lines_read: 0,
            records_truncated: 0,
            first_failure: None,
            error: None,
            finished: false,
        }
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn summary(&self) -> SummaryRecordStream {
        SummaryRecordStream {
            path: self.path.clone(),
            lines_read: self.lines_read,
            builder: self.builder.summary(),
            records_truncated: self.records_truncated,
            first_failure: self.first_failure.clone(),
            error: self.error.clone(),
            decode_replacements: self.lines.had_replacements(),
        }
    }

    /// Pass every record to `f` until the line source is exhausted.
    ///
    /// Stops at the first error from the line source or from `f`, and
    /// returns it. Otherwise returns the count of records passed to `f`.
    pub fn for_each_record<F>(
        &mut self,
        mut f: F,
    ) -> anyhow::Result<Count>
    where
        F: FnMut(&BackupRecord) -> anyhow::Result<()>,
    {
        let mut count: Count = 0;
        while let Some(result) = self.next() {
            let record: BackupRecord = result?;
            f(&record)?;
            count += 1;
        }

        Ok(count)
    }

    /// Release the line source and return the final summary.
    pub fn close(self) -> SummaryRecordStream {
        defñ!("close {:?}", self.path);
        self.summary()
    }

    /// No more lines. Any unfinished cycle is dropped.
    fn finish(&mut self) {
        self.finished = true;
        if self.builder.discard_in_progress() {
            defo!("log ended during a cycle");
            self.records_truncated += 1;
        }
    }
}

impl<L> Iterator for RecordStream<L>
where
    L: LineSource,
{
    type Item = Result<BackupRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let line: String = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    de_err!("{} reading {:?}", err, self.path);
                    self.error = Some(err.to_string());
                    self.finish();
                    return Some(Err(err));
                }
                None => {
                    self.finish();
                    return None;
                }
            };
            self.lines_read += 1;
            match self.builder.process_line(&line, &mut self.previous_end_time) {
                ResultS3::Found(record) => return Some(Ok(record)),
                ResultS3::Done => {}
                ResultS3::Err(failure) => {
                    defo!("line {}: {}", self.lines_read, failure);
                    if self.first_failure.is_none() {
                        self.first_failure = Some(format!("line {}: {}", self.lines_read, failure));
                    }
                }
            }
        }
    }
}
