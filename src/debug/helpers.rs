// src/debug/helpers.rs

//! Miscellaneous helper functions for testing.

use crate::common::FPath;

#[allow(unused_imports)] // XXX: clippy wrongly marks this as unused
use std::io::Write; // for `NamedTempFile.write_all`

use ::lazy_static::lazy_static;

#[doc(hidden)]
pub use ::tempfile::NamedTempFile;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// NamedTempFile instances default to this file name prefix.
///
/// See <https://github.com/Stebalien/tempfile/issues/183>.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-ntbl-test-";

lazy_static! {
    pub static ref STRING_TEMPFILE_PREFIX: String = String::from(STR_TEMPFILE_PREFIX);
}

/// Small helper function for copying `NamedTempFile` path to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    FPath::from(ntf.path().to_str().unwrap())
}

/// Testing helper function to write bytes to a temporary file.
pub fn create_temp_file_bytes(data: &[u8]) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        // use known prefix for easier cleanup
        .prefix::<str>(&STRING_TEMPFILE_PREFIX)
        .suffix(".log")
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new()..tempfile() return Err {}", err);
        }
    };
    match ntf.write_all(data) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }

    ntf
}

/// Testing helper function to write a `str` to a temporary file encoded as
/// UTF-8.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    create_temp_file_bytes(data.as_bytes())
}

/// Encode `data` as UTF-16LE, optionally with a leading byte-order mark.
///
/// `encoding_rs` does not encode to UTF-16 so this is done by hand.
pub fn str_to_utf16le_bytes(data: &str, bom: bool) -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::with_capacity(data.len() * 2 + 2);
    if bom {
        bytes.extend_from_slice(&[0xFF, 0xFE]);
    }
    for unit in data.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    bytes
}

/// Encode `data` as UTF-16BE, optionally with a leading byte-order mark.
pub fn str_to_utf16be_bytes(data: &str, bom: bool) -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::with_capacity(data.len() * 2 + 2);
    if bom {
        bytes.extend_from_slice(&[0xFE, 0xFF]);
    }
    for unit in data.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }

    bytes
}

/// Testing helper function to write a `str` to a temporary file encoded as
/// UTF-16LE, the native encoding of the backup agent's job logs.
pub fn create_temp_file_utf16le(data: &str) -> NamedTempFile {
    create_temp_file_bytes(&str_to_utf16le_bytes(data, true))
}
