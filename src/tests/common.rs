// src/tests/common.rs

//! Common fixtures for tests: timezone offsets, log line builders, and a
//! `StreamConfig`.

#![allow(non_upper_case_globals)]

use crate::data::datetime::{
    datetime_parse_from_str,
    DateTimeL,
    FixedOffset,
    YearRange,
};
use crate::readers::linesource::LogEncoding;
use crate::readers::recordstream::StreamConfig;

use ::lazy_static::lazy_static;

lazy_static! {
    /// `+09:00`, where the historical logs were written
    pub static ref FO_P9: FixedOffset = FixedOffset::east_opt(9 * 3600).unwrap();
    pub static ref FO_0: FixedOffset = FixedOffset::east_opt(0).unwrap();
}

/// the opaque tag of event lines
pub const TAG: &str = "<TID:23536><EDISON 2875:2874>";

pub const TS_0: &str = "2018-02-17 02:31:25.577";
pub const TS_1: &str = "2018-02-17 02:31:26.077";
pub const TS_2: &str = "2018-02-17 02:31:28.077";
pub const TS_3: &str = "2018-02-17 02:31:40.000";

/// parse `ts` at `FO_P9`
pub fn dt(ts: &str) -> DateTimeL {
    datetime_parse_from_str(ts, &FO_P9).unwrap()
}

pub fn line_bof(ts: &str) -> String {
    format!("{}  {}  BOF E:\\service1\\backup", ts, TAG)
}

/// `size` like `0|8684`
pub fn line_file(
    ts: &str,
    path: &str,
    size: &str,
) -> String {
    format!("{}  {}  <File> {}, size = {}", ts, TAG, path, size)
}

pub fn line_end(ts: &str) -> String {
    format!("{}  {}  BackupArchiveDetail: archived", ts, TAG)
}

pub fn line_noise(ts: &str) -> String {
    format!("{}  {}  OpenFile: handle 0x1f4", ts, TAG)
}

/// The three lines of one well-formed cycle.
pub fn cycle(
    ts_begin: &str,
    path: &str,
    size: &str,
    ts_end: &str,
) -> Vec<String> {
    vec![
        line_bof(ts_begin),
        line_file(ts_begin, path, size),
        line_end(ts_end),
    ]
}

/// `StreamConfig` for UTF-8 input at `FO_P9`.
pub fn config_utf8() -> StreamConfig {
    StreamConfig {
        encoding: LogEncoding::Utf8,
        years: YearRange::default(),
        tz_offset: *FO_P9,
    }
}
