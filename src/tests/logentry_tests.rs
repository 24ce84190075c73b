// src/tests/logentry_tests.rs

//! tests for `logentry.rs`

#![allow(non_snake_case)]

use crate::data::datetime::ymdhms;
use crate::data::logentry::LogEntry;

#[test]
fn test_new_single_line() {
    let dt = ymdhms(2023, 1, 2, 3, 4, 5);
    let entry = LogEntry::new(String::from("10 only line\n"), dt);
    assert_eq!(entry.count_lines(), 1);
    assert_eq!(entry.dt(), &dt);
    assert_eq!(entry.to_String(), "10 only line\n");
}

#[test]
fn test_push_line_appends_in_order() {
    let dt = ymdhms(2023, 1, 2, 3, 4, 5);
    let mut entry = LogEntry::new(String::from("10 first\n"), dt);
    entry.push_line(String::from("continuation A\n"));
    entry.push_line(String::from("continuation B"));
    assert_eq!(entry.count_lines(), 3);
    assert_eq!(entry.lines()[0], "10 first\n");
    assert_eq!(entry.lines()[1], "continuation A\n");
    assert_eq!(entry.lines()[2], "continuation B");
    assert_eq!(entry.to_String(), "10 first\ncontinuation A\ncontinuation B");
}

#[test]
fn test_lines_kept_verbatim() {
    let dt = ymdhms(2023, 1, 2, 3, 4, 5);
    let mut entry = LogEntry::new(String::from("10 first\r\n"), dt);
    entry.push_line(String::from("\n"));
    // carriage returns and blank continuation lines survive unchanged
    assert_eq!(entry.to_String(), "10 first\r\n\n");
}
