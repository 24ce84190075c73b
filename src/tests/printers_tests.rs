// src/tests/printers_tests.rs

//! tests for `printer/printers.rs`
//!
//! These write to the real STDOUT of the test process; they assert on byte
//! counts and on not-an-error, not on captured output.

#![allow(non_snake_case)]

use crate::common::PathId;
use crate::data::datetime::ymdhms;
use crate::data::logentry::LogEntry;
use crate::printer::printers::{
    color_for_source,
    Color,
    ColorChoice,
    PrinterLogEntry,
};

use ::test_case::test_case;

fn new_entry_2_lines() -> LogEntry {
    let mut entry = LogEntry::new(String::from("10 first\n"), ymdhms(1970, 1, 1, 0, 0, 10));
    entry.push_line(String::from("continuation\n"));

    entry
}

#[test_case(0, Color::Ansi256(1); "first source color index one")]
#[test_case(1, Color::Ansi256(2); "second source")]
#[test_case(254, Color::Ansi256(255); "last distinct color")]
#[test_case(255, Color::Ansi256(1); "wraps past 255")]
fn test_color_for_source(
    pathid: PathId,
    expect: Color,
) {
    assert_eq!(color_for_source(pathid), expect);
}

#[test]
fn test_print_plain_counts_content_bytes() {
    let mut printer = PrinterLogEntry::new(ColorChoice::Never, color_for_source(0), None);
    let entry = new_entry_2_lines();
    let printed = printer.print_logentry(&entry).unwrap();
    assert_eq!(printed, "10 first\ncontinuation\n".len());
}

#[test]
fn test_print_prefix_counts_prefix_bytes() {
    let prefix = String::from("log1 ");
    let mut printer =
        PrinterLogEntry::new(ColorChoice::Never, color_for_source(0), Some(prefix.clone()));
    let entry = new_entry_2_lines();
    let printed = printer.print_logentry(&entry).unwrap();
    // prefix repeats on every line of the entry
    assert_eq!(printed, "10 first\ncontinuation\n".len() + 2 * prefix.len());
}

#[test]
fn test_print_color_ok() {
    // escape sequences are not counted as printed content bytes
    let mut printer =
        PrinterLogEntry::new(ColorChoice::AlwaysAnsi, color_for_source(3), Some(String::from("b ")));
    let entry = new_entry_2_lines();
    let printed = printer.print_logentry(&entry).unwrap();
    assert_eq!(printed, "10 first\ncontinuation\n".len() + 2 * 2);
}

#[test]
fn test_print_color_unterminated_final_line_ok() {
    let mut printer = PrinterLogEntry::new(ColorChoice::AlwaysAnsi, color_for_source(0), None);
    let entry = LogEntry::new(String::from("10 no newline"), ymdhms(1970, 1, 1, 0, 0, 10));
    let printed = printer.print_logentry(&entry).unwrap();
    assert_eq!(printed, "10 no newline".len());
}
