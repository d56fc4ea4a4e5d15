// src/data/filesize.rs

//! Decode the path and the encoded file size of a `<File>` line payload.
//!
//! The backup agent writes the file size as `high|low`, the two 32-bit
//! halves `nFileSizeHigh` and `nFileSizeLow` of a Windows
//! [`WIN32_FIND_DATA`]. The agent prints `low` as a signed 32-bit integer so
//! a low half at or above `0x80000000` is printed negative, e.g.
//! `0|-1294967296` is `3000000000` bytes.
//!
//! Two payload styles are written by different agent versions:
//!
//! ```text
//! E:\data\report.xls, size = 0|8684
//! E:\data\report.xls size = 0|8684
//! ```
//!
//! [`WIN32_FIND_DATA`]: https://learn.microsoft.com/en-us/windows/win32/api/minwinbase/ns-minwinbase-win32_find_dataw

use crate::common::FileSz;
use crate::data::record::BuildFailure;

use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// One more than the largest 32-bit value, the multiplier of the high half.
pub const DWORD_RANGE: u64 = 0x1_0000_0000;

/// The largest value of one 32-bit half.
const DWORD_MAX: u64 = DWORD_RANGE - 1;

lazy_static! {
    /// Captures the path, the high half, the sign of the low half, the low half.
    ///
    /// The path is greedy so a path holding `" size = "` is kept whole.
    static ref RE_FILE_PAYLOAD: Regex = Regex::new(
        r"^(.+) size = ([0-9]+)\|(-?)([0-9]+)$"
    ).unwrap();
}

/// Combine the two halves of an encoded file size.
///
/// `low_negative` is the `-` sign printed before `low`; a negative low half
/// is reinterpreted as unsigned `0x100000000 - low`.
///
/// Returns `None` if either half does not fit in 32 bits.
pub fn decode_filesize(
    high: u64,
    low_negative: bool,
    low: u64,
) -> Option<FileSz> {
    if high > DWORD_MAX {
        return None;
    }
    let low_unsigned: u64 = match low_negative {
        true => DWORD_RANGE.checked_sub(low)?,
        false if low > DWORD_MAX => return None,
        false => low,
    };

    high.checked_mul(DWORD_RANGE)?
        .checked_add(low_unsigned)
}

/// Parse a `<File>` line `payload` into the file path and decoded file size.
///
/// A `,` ending the path is the separator of the newer payload style and is
/// removed.
pub fn parse_file_payload(payload: &str) -> Result<(String, FileSz), BuildFailure> {
    defn!("parse_file_payload({:?})", payload);
    let malformed = || BuildFailure::MalformedSizePayload(payload.to_string());
    let captures = match RE_FILE_PAYLOAD.captures(payload) {
        Some(captures) => captures,
        None => {
            defx!("no match");
            return Err(malformed());
        }
    };
    let path: &str = &captures[1];
    let path: &str = path.strip_suffix(',').unwrap_or(path);
    if path.is_empty() {
        defx!("empty path");
        return Err(malformed());
    }
    let high: u64 = captures[2].parse::<u64>().map_err(|_| malformed())?;
    let low_negative: bool = !captures[3].is_empty();
    let low: u64 = captures[4].parse::<u64>().map_err(|_| malformed())?;
    let filesz: FileSz = match decode_filesize(high, low_negative, low) {
        Some(val) => val,
        None => {
            defx!("out of range high {} low {}{}", high, &captures[3], low);
            return Err(malformed());
        }
    };
    defx!("return ({:?}, {})", path, filesz);

    Ok((path.to_string(), filesz))
}
