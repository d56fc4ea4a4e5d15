// src/readers/linematcher.rs

//! Implements a [`LineMatcher`], the classifier of backup agent job log
//! lines.
//!
//! An event line looks like
//!
//! ```text
//! 2018-02-18 01:59:53.997  <TID:23536><EDISON 2875:2874>  <File> E:\data\report.xls, size = 0|8684
//! ```
//!
//! That is a timestamp, two spaces, an opaque `<...>` tag, two spaces, the
//! event keyword, a space, and the keyword's payload.

use crate::data::datetime::{Year, YearRange};
#[allow(unused_imports)]
use crate::debug::printers::str_to_String_noraw;

use std::fmt;

use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

lazy_static! {
    /// Captures the timestamp, the timestamp year, the event keyword,
    /// the payload.
    static ref RE_EVENT_LINE: Regex = Regex::new(
        r"(([0-9]{4})-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3})  <.*>  ([^ ]+)(?: (.*))?$"
    ).unwrap();
}

/// The event keywords that matter to building a record.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EventKind {
    /// `BOF`, begin of a cycle
    Bof,
    /// `<File>`, the path and encoded size of the file
    File,
    /// `BackupArchiveDetail:`, end of a cycle
    BackupArchiveDetail,
}

impl EventKind {
    pub const fn keyword(&self) -> &'static str {
        match self {
            EventKind::Bof => "BOF",
            EventKind::File => "<File>",
            EventKind::BackupArchiveDetail => "BackupArchiveDetail:",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<EventKind> {
        match keyword {
            "BOF" => Some(EventKind::Bof),
            "<File>" => Some(EventKind::File),
            "BackupArchiveDetail:" => Some(EventKind::BackupArchiveDetail),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A classified event line. Borrows from the line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LineMatch<'a> {
    /// e.g. `2018-02-18 01:59:53.997`
    pub timestamp: &'a str,
    pub event: EventKind,
    /// text after the event keyword; empty if there is none
    pub payload: &'a str,
}

/// Classifies one log line at a time. Holds no state between lines.
#[derive(Clone, Debug, Default)]
pub struct LineMatcher {
    years: YearRange,
}

impl LineMatcher {
    pub fn new(years: YearRange) -> LineMatcher {
        LineMatcher { years }
    }

    pub const fn years(&self) -> &YearRange {
        &self.years
    }

    /// Classify `line`.
    ///
    /// Returns `None` for lines that are not event lines, lines with a
    /// timestamp year outside `self.years`, and event lines with keywords
    /// other than an [`EventKind`].
    pub fn match_line<'a>(
        &self,
        line: &'a str,
    ) -> Option<LineMatch<'a>> {
        let captures = RE_EVENT_LINE.captures(line)?;
        let year: Year = captures.get(2)?.as_str().parse::<Year>().ok()?;
        if !self.years.contains(year) {
            defñ!("year {} not in {}; {:?}", year, self.years, str_to_String_noraw(line));
            return None;
        }
        let event: EventKind = EventKind::from_keyword(captures.get(3)?.as_str())?;
        let timestamp: &'a str = captures.get(1)?.as_str();
        let payload: &'a str = captures.get(4).map_or("", |m| m.as_str());
        defñ!("{} {:?} {:?}", event, timestamp, str_to_String_noraw(payload));

        Some(LineMatch {
            timestamp,
            event,
            payload,
        })
    }
}
