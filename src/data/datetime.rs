// src/data/datetime.rs

//! Datetime types and parsing of log timestamps.
//!
//! Log timestamps look like `2018-02-17 02:31:25.577`. They have no
//! timezone so they are interpreted at a user-chosen [`FixedOffset`].

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    Duration,
    FixedOffset,
    Local,
    LocalResult,
    NaiveDateTime,
    TimeZone,
};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use std::fmt;
use std::str::FromStr;

/// A log timestamp at a known timezone offset.
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

pub type Year = i32;

/// `strftime` pattern for printing a log timestamp, e.g. `2018-02-17 02:31:25.577`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// `strptime` pattern for parsing a log timestamp.
/// `%.f` accepts the leading `.` and any count of fractional digits.
const DATETIME_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// The timezone offset of the local system, right now.
pub fn local_offset() -> FixedOffset {
    *Local::now().offset()
}

/// Parse a log timestamp `data` like `2018-02-17 02:31:25.577` as a datetime
/// at timezone offset `tz_offset`.
///
/// Returns `None` for values that do not make a valid date or time,
/// e.g. `2018-02-30 00:00:00.000`.
pub fn datetime_parse_from_str(
    data: &str,
    tz_offset: &FixedOffset,
) -> DateTimeLOpt {
    let naive: NaiveDateTime = match NaiveDateTime::parse_from_str(data, DATETIME_PARSE_FORMAT) {
        Ok(val) => val,
        Err(_err) => {
            defñ!("NaiveDateTime::parse_from_str({:?}) failed {}", data, _err);
            return None;
        }
    };
    match tz_offset.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        _ => None,
    }
}

/// Format a datetime like `2018-02-17 02:31:25.577`.
pub fn datetime_to_string(dt: &DateTimeL) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Render `duration` as signed seconds with millisecond precision,
/// e.g. `61.005`, `0.000`, `-1.250`.
///
/// Negative durations are printed as-is; logs may have clock anomalies.
pub fn duration_to_seconds_string(duration: &Duration) -> String {
    let ms: i64 = duration.num_milliseconds();
    let sign: &str = if ms < 0 { "-" } else { "" };
    let ms_abs: u64 = ms.unsigned_abs();

    format!("{}{}.{:03}", sign, ms_abs / 1000, ms_abs % 1000)
}

/// `duration` as fractional seconds.
pub fn duration_to_seconds_f64(duration: &Duration) -> f64 {
    duration.num_milliseconds() as f64 / 1000.0
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// YearRange
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Inclusive range of years accepted on log timestamps.
///
/// Lines with a timestamp year outside of this range are not event lines.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct YearRange {
    first: Year,
    last: Year,
}

impl YearRange {
    /// Years of the historical backup agent logs.
    pub const DEFAULT_FIRST: Year = 2017;
    pub const DEFAULT_LAST: Year = 2018;

    /// Returns `None` if `first` is after `last`.
    pub fn new(first: Year, last: Year) -> Option<YearRange> {
        if first > last {
            return None;
        }

        Some(YearRange { first, last })
    }

    pub const fn first(&self) -> Year {
        self.first
    }

    pub const fn last(&self) -> Year {
        self.last
    }

    pub const fn contains(&self, year: Year) -> bool {
        self.first <= year && year <= self.last
    }
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange {
            first: YearRange::DEFAULT_FIRST,
            last: YearRange::DEFAULT_LAST,
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{}-{}", self.first, self.last)
        }
    }
}

/// Parse `"2017-2018"` or `"2018"`.
impl FromStr for YearRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (first_s, last_s) = match s.split_once('-') {
            Some((first_s, last_s)) => (first_s.trim(), last_s.trim()),
            None => (s, s),
        };
        let parse_year = |ys: &str| -> Result<Year, String> {
            match ys.parse::<Year>() {
                Ok(year) if (0..=9999).contains(&year) => Ok(year),
                _ => Err(format!("Invalid year {:?} in year range {:?}", ys, s)),
            }
        };
        let first: Year = parse_year(first_s)?;
        let last: Year = parse_year(last_s)?;
        match YearRange::new(first, last) {
            Some(yr) => Ok(yr),
            None => Err(format!("First year {} is after last year {} in year range {:?}", first, last, s)),
        }
    }
}
