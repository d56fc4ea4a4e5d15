// src/tests/linematcher_tests.rs

//! tests for `linematcher.rs`

#![allow(non_snake_case)]

use crate::data::datetime::YearRange;
use crate::readers::linematcher::{EventKind, LineMatch, LineMatcher};

use ::test_case::test_case;

const LINE_FILE: &str = "2018-02-18 01:59:53.997  <TID:23536><EDISON 2875:2874>  <File> E:\\service1\\hansya1_kiht\\SH\\renraku\\０４年度まで, size = 0|0";

#[test]
fn test_LineMatcher_file_line() {
    let lm = LineMatcher::default();
    let linematch: LineMatch = lm.match_line(LINE_FILE).unwrap();
    assert_eq!(linematch.timestamp, "2018-02-18 01:59:53.997");
    assert_eq!(linematch.event, EventKind::File);
    assert_eq!(linematch.payload, "E:\\service1\\hansya1_kiht\\SH\\renraku\\０４年度まで, size = 0|0");
}

#[test_case(
    "2017-12-31 23:59:59.999  <TID:1>  BOF E:\\a.txt",
    "2017-12-31 23:59:59.999", EventKind::Bof, "E:\\a.txt";
    "BOF"
)]
#[test_case(
    "2018-02-17 02:31:25.577  <TID:1><AGENT 1:2>  BOF",
    "2018-02-17 02:31:25.577", EventKind::Bof, "";
    "BOF no payload"
)]
#[test_case(
    "2018-02-17 02:31:25.601  <TID:1><AGENT 1:2>  BackupArchiveDetail: size 8684 ok",
    "2018-02-17 02:31:25.601", EventKind::BackupArchiveDetail, "size 8684 ok";
    "BackupArchiveDetail"
)]
#[test_case(
    "2018-02-17 02:31:25.580  <TID:1><AGENT 1:2>  <File> E:\\data\\a.xls size = 0|8684",
    "2018-02-17 02:31:25.580", EventKind::File, "E:\\data\\a.xls size = 0|8684";
    "File legacy"
)]
#[test_case(
    "\u{FEFF}2018-02-17 02:31:25.577  <TID:1>  BOF x",
    "2018-02-17 02:31:25.577", EventKind::Bof, "x";
    "leading garbage"
)]
fn test_LineMatcher_match(line: &str, timestamp: &str, event: EventKind, payload: &str) {
    let lm = LineMatcher::default();
    let linematch: LineMatch = lm.match_line(line).unwrap();
    assert_eq!(linematch.timestamp, timestamp);
    assert_eq!(linematch.event, event);
    assert_eq!(linematch.payload, payload);
}

#[test_case(""; "empty")]
#[test_case("hello world"; "text")]
#[test_case("2018-02-17 02:31:25.577  <TID:1>  EOF E:\\a.txt"; "unknown keyword")]
#[test_case("2018-02-17 02:31:25.577  <TID:1>  OpenFile: handle"; "other keyword")]
#[test_case("2018-02-17 02:31:25.577 <TID:1> BOF E:\\a.txt"; "single spaces")]
#[test_case("2018-02-17 02:31:25  <TID:1>  BOF E:\\a.txt"; "no milliseconds")]
#[test_case("2018-02-17 02:31:25.577  TID:1  BOF E:\\a.txt"; "no tag brackets")]
#[test_case("2016-02-17 02:31:25.577  <TID:1>  BOF E:\\a.txt"; "year before range")]
#[test_case("2019-02-17 02:31:25.577  <TID:1>  BOF E:\\a.txt"; "year after range")]
#[test_case("2018-02-17 02:31:25.577  <TID:1>  bof E:\\a.txt"; "lowercase keyword")]
fn test_LineMatcher_no_match(line: &str) {
    let lm = LineMatcher::default();
    assert_eq!(lm.match_line(line), None);
}

#[test]
fn test_LineMatcher_years() {
    let line = "2024-06-01 10:00:00.000  <TID:1>  BOF E:\\a.txt";
    let lm = LineMatcher::default();
    assert_eq!(lm.match_line(line), None);
    let lm = LineMatcher::new(YearRange::new(2020, 2025).unwrap());
    assert_eq!(lm.match_line(line).unwrap().event, EventKind::Bof);
    assert_eq!(lm.years(), &YearRange::new(2020, 2025).unwrap());
}

#[test]
fn test_EventKind_keyword() {
    for event in [EventKind::Bof, EventKind::File, EventKind::BackupArchiveDetail] {
        assert_eq!(EventKind::from_keyword(event.keyword()), Some(event));
        assert_eq!(event.to_string(), event.keyword());
    }
    assert_eq!(EventKind::from_keyword("EOF"), None);
}
