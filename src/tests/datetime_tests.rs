// src/tests/datetime_tests.rs

//! tests for `datetime.rs` functions

#![allow(non_snake_case)]

use crate::data::datetime::{
    epoch_to_datetime,
    ymdhms,
    ymdhmsn,
    DateTimeMOpt,
    DateTimeParseInstr,
    TimestampDetector,
};

use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("2023/01/02 03:04:05.678901 entry", Some(ymdhmsn(2023, 1, 2, 3, 4, 5, 678901000)); "slashed fractional")]
#[test_case("2023/01/02 03:04:05.5 entry\n", Some(ymdhmsn(2023, 1, 2, 3, 4, 5, 500000000)); "slashed one fraction digit")]
#[test_case("2023-01-02 03:04:05,678 entry\n", Some(ymdhmsn(2023, 1, 2, 3, 4, 5, 678000000)); "cloud init")]
#[test_case("10 entry\n", Some(ymdhms(1970, 1, 1, 0, 0, 10)); "epoch integer")]
#[test_case("10.5 entry\n", Some(ymdhmsn(1970, 1, 1, 0, 0, 10, 500000000)); "epoch fractional")]
#[test_case("1673629445 entry\n", Some(ymdhms(2023, 1, 13, 17, 4, 5)); "epoch large")]
#[test_case("no datetime here\n", None; "plain text")]
#[test_case("", None; "empty line")]
#[test_case(" 2023/01/02 03:04:05.678901 entry", None; "not anchored at position zero")]
#[test_case("2023/01/02 03:04:05 entry", None; "slashed requires fraction")]
#[test_case("2023-01-02 03:04:05,67 entry\n", None; "cloud init requires three millisecond digits")]
#[test_case("2023/01/02 03:04:05.678901entry", None; "slashed requires terminating space")]
#[test_case("10entry\n", None; "epoch requires terminating space")]
#[test_case("2023/02/30 03:04:05.1 entry\n", None; "matched text fails chrono parse")]
#[test_case("99999999999999999999 entry\n", None; "epoch seconds overflow")]
fn test_builtin_chain(
    line: &str,
    expect: DateTimeMOpt,
) {
    let detector = TimestampDetector::new();
    assert_eq!(detector.datetime_from_line(line), expect, "line {:?}", line);
}

#[test_case("0", Some(ymdhms(1970, 1, 1, 0, 0, 0)); "zero")]
#[test_case("1.5", Some(ymdhmsn(1970, 1, 1, 0, 0, 1, 500000000)); "half second")]
#[test_case("1.000000001", Some(ymdhmsn(1970, 1, 1, 0, 0, 1, 1)); "one nanosecond")]
#[test_case("1.1234567891234", Some(ymdhmsn(1970, 1, 1, 0, 0, 1, 123456789)); "truncated past nanoseconds")]
#[test_case("99999999999999999999", None; "seconds overflow")]
fn test_epoch_to_datetime(
    text: &str,
    expect: DateTimeMOpt,
) {
    assert_eq!(epoch_to_datetime(text), expect, "text {:?}", text);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const CUSTOM_REGEX: &str = r"\[(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2})\]";
const CUSTOM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn custom_detector() -> TimestampDetector {
    TimestampDetector::with_custom(CUSTOM_REGEX, CUSTOM_FORMAT)
        .expect("with_custom failed on a valid rule")
}

#[test]
fn test_custom_rule_matches() {
    let detector = custom_detector();
    assert_eq!(
        detector.datetime_from_line("[2023-01-02T03:04:05] entry\n"),
        Some(ymdhms(2023, 1, 2, 3, 4, 5)),
    );
}

#[test]
fn test_custom_rule_anchored() {
    let detector = custom_detector();
    assert_eq!(detector.datetime_from_line("x [2023-01-02T03:04:05] entry\n"), None);
}

/// a configured custom rule replaces the built-in chain entirely;
/// lines in a built-in form become continuation lines
#[test_case("2023/01/02 03:04:05.678901 entry\n"; "slashed fractional form")]
#[test_case("2023-01-02 03:04:05,678 entry\n"; "cloud init form")]
#[test_case("1673629445 entry\n"; "epoch form")]
fn test_custom_rule_replaces_builtins(line: &str) {
    let detector = custom_detector();
    assert_eq!(detector.datetime_from_line(line), None, "line {:?}", line);
}

#[test_case(r"(", CUSTOM_FORMAT; "regex does not compile")]
#[test_case(r"\d+ ", CUSTOM_FORMAT; "regex has no capture group")]
#[test_case(r"(\d+) (\d+)", CUSTOM_FORMAT; "regex has two capture groups")]
#[test_case(CUSTOM_REGEX, "%Y %Q"; "format has invalid specifier")]
fn test_custom_rule_invalid_fails_fast(
    regex_pattern: &str,
    strftime_pattern: &str,
) {
    assert!(
        TimestampDetector::with_custom(regex_pattern, strftime_pattern).is_err(),
        "expected Err for regex {:?} format {:?}",
        regex_pattern,
        strftime_pattern,
    );
}

#[test]
fn test_custom_rule_noncapturing_groups_allowed() {
    // `(?:…)` groups do not capture; exactly one capturing group remains
    let instr = DateTimeParseInstr::new_custom(
        r"(?:ts|time)=(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2})",
        CUSTOM_FORMAT,
    );
    assert!(instr.is_ok());
    let instr = instr.unwrap();
    assert_eq!(
        instr.datetime_from_line("time=2023-01-02T03:04:05 entry\n"),
        Some(ymdhms(2023, 1, 2, 3, 4, 5)),
    );
}

#[test]
fn test_custom_rule_unparseable_match_is_no_match() {
    let detector = custom_detector();
    // regex matches, chrono refuses the calendar date
    assert_eq!(detector.datetime_from_line("[2023-02-30T03:04:05] entry\n"), None);
}
