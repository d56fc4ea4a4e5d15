// src/tests/filesize_tests.rs

//! tests for `filesize.rs`

use crate::common::FileSz;
use crate::data::filesize::{decode_filesize, parse_file_payload, DWORD_RANGE};
use crate::data::record::BuildFailure;

use ::test_case::test_case;

#[test_case(0, false, 0, Some(0); "zero")]
#[test_case(0, false, 8684, Some(8684); "low only")]
#[test_case(1, false, 0, Some(4294967296); "high only")]
#[test_case(1, false, 100, Some(4294967396); "high and low")]
#[test_case(0, true, 1294967296, Some(3000000000); "negative low")]
#[test_case(2, true, 1, Some(3 * DWORD_RANGE - 1); "high and negative low")]
#[test_case(0, true, 2147483648, Some(2147483648); "negative low i32 min")]
#[test_case(0, false, 4294967295, Some(4294967295); "low u32 max")]
#[test_case(4294967295, false, 4294967295, Some(u64::MAX); "both u32 max")]
#[test_case(4294967296, false, 0, None; "high too large")]
#[test_case(0, false, 4294967296, None; "low too large")]
#[test_case(0, true, 4294967297, None; "negative low too large")]
#[test_case(4294967295, true, 0, None; "overflow")]
fn test_decode_filesize(high: u64, low_negative: bool, low: u64, expect: Option<FileSz>) {
    assert_eq!(decode_filesize(high, low_negative, low), expect);
}

#[test]
fn test_decode_filesize_nonnegative_formula() {
    for high in [0_u64, 1, 7, 1000, 65535] {
        for low in [0_u64, 1, 8684, 0x7FFF_FFFF, 0xFFFF_FFFF] {
            assert_eq!(
                decode_filesize(high, false, low),
                Some(high * DWORD_RANGE + low),
                "high {} low {}", high, low
            );
        }
    }
}

#[test]
fn test_decode_filesize_negative_formula() {
    for high in [0_u64, 1, 7, 1000] {
        for low in [1_u64, 2, 8684, 0x8000_0000] {
            assert_eq!(
                decode_filesize(high, true, low),
                Some(high * DWORD_RANGE + (DWORD_RANGE - low)),
                "high {} low -{}", high, low
            );
        }
    }
}

#[test_case("E:\\data\\a.xls, size = 0|0", "E:\\data\\a.xls", 0; "comma style zero")]
#[test_case("E:\\data\\a.xls, size = 0|8684", "E:\\data\\a.xls", 8684; "comma style")]
#[test_case("E:\\data\\a.xls size = 0|8684", "E:\\data\\a.xls", 8684; "legacy style")]
#[test_case("/a, size = 0|100", "/a", 100; "short path")]
#[test_case("/b, size = 1|0", "/b", 4294967296; "high half")]
#[test_case("/c, size = 1|-1", "/c", 8589934591; "negative low half")]
#[test_case("a, b, c.txt, size = 0|5", "a, b, c.txt", 5; "path with commas")]
#[test_case("E:\\service1\\hansya1_kiht\\SH\\renraku\\０４年度まで, size = 0|0", "E:\\service1\\hansya1_kiht\\SH\\renraku\\０４年度まで", 0; "unicode path")]
#[test_case("x size = 2 size = 0|3", "x size = 2", 3; "path holding size text")]
fn test_parse_file_payload(payload: &str, path: &str, size: FileSz) {
    let (path_, size_) = parse_file_payload(payload).unwrap();
    assert_eq!(path_, path);
    assert_eq!(size_, size);
}

#[test_case(""; "empty")]
#[test_case("E:\\data\\a.xls"; "no size")]
#[test_case("E:\\data\\a.xls, size = 0"; "no low half")]
#[test_case("E:\\data\\a.xls, size = |5"; "no high half")]
#[test_case("E:\\data\\a.xls, size=0|5"; "no spaces")]
#[test_case("E:\\data\\a.xls, size = -1|5"; "negative high half")]
#[test_case("E:\\data\\a.xls, size = 0|5 "; "trailing space")]
#[test_case(", size = 0|5"; "empty path")]
#[test_case(" size = 0|5"; "no path")]
#[test_case("E:\\data\\a.xls, size = 4294967296|0"; "high half too large")]
#[test_case("E:\\data\\a.xls, size = 0|99999999999999999999999"; "low half overflows u64")]
fn test_parse_file_payload_malformed(payload: &str) {
    assert_eq!(
        parse_file_payload(payload),
        Err(BuildFailure::MalformedSizePayload(payload.to_string()))
    );
}
