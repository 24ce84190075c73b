// src/data/datetime.rs

//! Recognize and parse a datetime at the beginning of a log line.
//!
//! Recognizing a datetime requires:
//! 1. matching a regular expression against the start of the line; the
//!    regular expression captures the entire datetime substring
//! 2. transforming the captured text into a chrono [`NaiveDateTime`]
//!
//! A [`TimestampDetector`] tries each built-in [`DateTimeParseInstr`] in
//! fixed priority order; the first rule whose regular expression matches
//! wins. A user-supplied custom rule, when present, entirely replaces the
//! built-in chain; it is tried exclusively, never as an addition.
//!
//! The most relevant documents to understand this file are:
//! - `chrono` crate [`strftime`] formatting.
//! - `regex` crate [Regular Expression syntax].
//!
//! [`NaiveDateTime`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDateTime.html
//! [`TimestampDetector`]: self::TimestampDetector
//! [`DateTimeParseInstr`]: self::DateTimeParseInstr
//! [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
//! [Regular Expression syntax]: https://docs.rs/regex/1.11.1/regex/index.html#syntax

#![allow(non_camel_case_types)]

use std::io::{Error, ErrorKind, Result};
use std::sync::Arc;

#[doc(hidden)]
pub use ::chrono::NaiveDateTime;
use ::chrono::format::{Item, StrftimeItems};
use ::chrono::DateTime;
use ::chrono::NaiveDate;
use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

#[allow(unused_imports)]
use crate::debug::printers::{de_err, de_wrn};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime Regex matching and strftime parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The chrono datetime type used in _lmlib_.
///
/// Naive because none of the built-in rules carry a timezone; entries are
/// compared among sources exactly as their datetime strings parse.
pub type DateTimeM = NaiveDateTime;
pub type DateTimeMOpt = Option<DateTimeM>;

/// Crate `chrono` [`strftime`] formatting pattern, passed to
/// chrono [`NaiveDateTime::parse_from_str`].
///
/// [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
/// [`NaiveDateTime::parse_from_str`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDateTime.html#method.parse_from_str
pub type DateTimePattern_str = str;

/// Regular expression formatting pattern, passed to [`regex::Regex`].
///
/// [`regex::Regex`]: https://docs.rs/regex/1.11.1/regex/struct.Regex.html
pub type DateTimeRegex_str = str;

/// The regular expression "class" used here, specifically for matching
/// datetime substrings at the start of a line.
pub type DateTimeRegex = Regex;

/// Regex for the slash-delimited fractional-second form,
/// e.g. `"2023/01/02 03:04:05.678901 "`.
///
/// The datetime substring is terminated by a space.
pub const DTR_SLASHED_FRACTIONAL: &DateTimeRegex_str =
    r"^(\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}\.\d+) ";

/// strftime pattern paired with [`DTR_SLASHED_FRACTIONAL`].
///
/// [`DTR_SLASHED_FRACTIONAL`]: self::DTR_SLASHED_FRACTIONAL
pub const DTP_SLASHED_FRACTIONAL: &DateTimePattern_str = "%Y/%m/%d %H:%M:%S%.f";

/// Regex for the dash-delimited comma-millisecond form written by cloud-init,
/// e.g. `"2023-01-02 03:04:05,678 "`.
pub const DTR_CLOUD_INIT: &DateTimeRegex_str = r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3}) ";

/// strftime pattern paired with [`DTR_CLOUD_INIT`].
///
/// [`DTR_CLOUD_INIT`]: self::DTR_CLOUD_INIT
pub const DTP_CLOUD_INIT: &DateTimePattern_str = "%Y-%m-%d %H:%M:%S,%3f";

/// Regex for a bare numeric Unix epoch `seconds[.fraction]`,
/// e.g. `"1673629445.678 "`. Interpreted as UTC.
pub const DTR_EPOCH: &DateTimeRegex_str = r"^(\d+(?:\.\d+)?) ";

/// How the text captured by a [`DateTimeParseInstr`] regex becomes a
/// [`DateTimeM`].
///
/// [`DateTimeParseInstr`]: self::DateTimeParseInstr
/// [`DateTimeM`]: self::DateTimeM
#[derive(Clone, Debug)]
pub enum DateTimeParseKind {
    /// Parse with [`NaiveDateTime::parse_from_str`] using this strftime
    /// pattern.
    ///
    /// [`NaiveDateTime::parse_from_str`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDateTime.html#method.parse_from_str
    Strftime(String),
    /// Interpret as Unix epoch seconds with optional fraction, UTC.
    Epoch,
}

/// One rule for recognizing a datetime at the start of a line: a regular
/// expression with exactly one capture group, paired with the recipe for
/// parsing the captured text.
#[derive(Clone, Debug)]
pub struct DateTimeParseInstr {
    regex: DateTimeRegex,
    kind: DateTimeParseKind,
}

impl DateTimeParseInstr {
    /// Create a `DateTimeParseInstr` from a known-good built-in pattern pair.
    fn new_strftime(
        regex_pattern: &DateTimeRegex_str,
        strftime_pattern: &DateTimePattern_str,
    ) -> DateTimeParseInstr {
        DateTimeParseInstr {
            // built-in patterns are tested; `unwrap` is sound
            regex: Regex::new(regex_pattern).unwrap(),
            kind: DateTimeParseKind::Strftime(String::from(strftime_pattern)),
        }
    }

    /// Create a `DateTimeParseInstr` from user-supplied strings, validating
    /// both. Called once at program startup; a bad regular expression or a
    /// bad strftime format must fail here, not later during per-line
    /// matching.
    pub fn new_custom(
        regex_pattern: &DateTimeRegex_str,
        strftime_pattern: &DateTimePattern_str,
    ) -> Result<DateTimeParseInstr> {
        defn!("({:?}, {:?})", regex_pattern, strftime_pattern);
        // anchor the user pattern at position 0; the non-capturing group
        // keeps the user's capture group 1 numbered as group 1
        let anchored = format!("^(?:{})", regex_pattern);
        let regex: DateTimeRegex = match Regex::new(&anchored) {
            Ok(val) => val,
            Err(err) => {
                defx!("return Err (bad regex)");
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("invalid regex {:?}; {}", regex_pattern, err),
                ));
            }
        };
        // `captures_len` includes the implicit whole-match group 0
        if regex.captures_len() != 2 {
            defx!("return Err (capture group count {})", regex.captures_len() - 1);
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "regex {:?} must have exactly one capture group for the datetime, has {}",
                    regex_pattern,
                    regex.captures_len() - 1,
                ),
            ));
        }
        if StrftimeItems::new(strftime_pattern).any(|item| matches!(item, Item::Error)) {
            defx!("return Err (bad strftime format)");
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("invalid strftime format {:?}", strftime_pattern),
            ));
        }
        defx!("return Ok");

        Ok(DateTimeParseInstr {
            regex,
            kind: DateTimeParseKind::Strftime(String::from(strftime_pattern)),
        })
    }

    /// If `line` begins with a datetime recognized by this rule then return
    /// it, else `None`.
    ///
    /// A regex match whose captured text chrono then refuses to parse
    /// (e.g. `"2023/02/30 …"`) is treated as no match; the line becomes a
    /// continuation line.
    pub fn datetime_from_line(
        &self,
        line: &str,
    ) -> DateTimeMOpt {
        let captures = match self.regex.captures(line) {
            Some(val) => val,
            None => return None,
        };
        let text: &str = match captures.get(1) {
            Some(val) => val.as_str(),
            None => return None,
        };
        match &self.kind {
            DateTimeParseKind::Strftime(pattern) => {
                match DateTimeM::parse_from_str(text, pattern.as_str()) {
                    Ok(dt) => Some(dt),
                    Err(_err) => {
                        de_wrn!("matched datetime text {:?} failed to parse with {:?}; {}", text, pattern, _err);
                        None
                    }
                }
            }
            DateTimeParseKind::Epoch => epoch_to_datetime(text),
        }
    }
}

/// Transform epoch text `seconds[.fraction]` to a [`DateTimeM`], UTC.
///
/// The fraction is scaled digit-wise to nanoseconds (digits past the ninth
/// are dropped); no float round-trip.
///
/// [`DateTimeM`]: self::DateTimeM
pub fn epoch_to_datetime(text: &str) -> DateTimeMOpt {
    let (seconds_s, fraction_s) = match text.split_once('.') {
        Some((sec, frac)) => (sec, frac),
        None => (text, ""),
    };
    // absurdly long digit runs overflow; that is not a timestamp
    let seconds: i64 = match seconds_s.parse() {
        Ok(val) => val,
        Err(_) => return None,
    };
    let mut nanoseconds: u32 = 0;
    if !fraction_s.is_empty() {
        let digits: &str = fraction_s.get(..9).unwrap_or(fraction_s);
        nanoseconds = match digits.parse::<u32>() {
            Ok(val) => val,
            Err(_) => return None,
        };
        for _ in digits.len()..9 {
            nanoseconds *= 10;
        }
    }

    DateTime::from_timestamp(seconds, nanoseconds).map(|dt| dt.naive_utc())
}

lazy_static! {
    /// The built-in rule chain, in priority order:
    /// 1. [`DTR_SLASHED_FRACTIONAL`]
    /// 2. [`DTR_CLOUD_INIT`]
    /// 3. [`DTR_EPOCH`]
    ///
    /// [`DTR_SLASHED_FRACTIONAL`]: self::DTR_SLASHED_FRACTIONAL
    /// [`DTR_CLOUD_INIT`]: self::DTR_CLOUD_INIT
    /// [`DTR_EPOCH`]: self::DTR_EPOCH
    static ref DATETIME_PARSE_INSTRS: [DateTimeParseInstr; 3] = [
        DateTimeParseInstr::new_strftime(DTR_SLASHED_FRACTIONAL, DTP_SLASHED_FRACTIONAL),
        DateTimeParseInstr::new_strftime(DTR_CLOUD_INIT, DTP_CLOUD_INIT),
        DateTimeParseInstr {
            regex: Regex::new(DTR_EPOCH).unwrap(),
            kind: DateTimeParseKind::Epoch,
        },
    ];
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TimestampDetector
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Determines whether a line of text begins a new log entry and, if so, its
/// datetime.
///
/// Holds the optional custom rule as explicit per-instance configuration,
/// threaded in at construction. One instance is shared by every
/// [`LogEntryReader`] of a merge run (see [`TimestampDetectorP`]).
///
/// [`LogEntryReader`]: crate::readers::logentryreader::LogEntryReader
/// [`TimestampDetectorP`]: self::TimestampDetectorP
#[derive(Debug)]
pub struct TimestampDetector {
    /// When set, tried exclusively; the built-in chain is not consulted.
    custom: Option<DateTimeParseInstr>,
}

/// Thread-safe, shareable `TimestampDetector`.
pub type TimestampDetectorP = Arc<TimestampDetector>;

impl TimestampDetector {
    /// A detector using the built-in rule chain.
    pub fn new() -> TimestampDetector {
        TimestampDetector { custom: None }
    }

    /// A detector using only the passed custom rule.
    /// Fails fast on malformed configuration.
    pub fn with_custom(
        regex_pattern: &DateTimeRegex_str,
        strftime_pattern: &DateTimePattern_str,
    ) -> Result<TimestampDetector> {
        let instr = DateTimeParseInstr::new_custom(regex_pattern, strftime_pattern)?;

        Ok(TimestampDetector { custom: Some(instr) })
    }

    /// If `line` begins with a recognizable datetime then return it, else
    /// `None` (the line is a continuation line).
    ///
    /// Matching is anchored at position 0 of `line`.
    pub fn datetime_from_line(
        &self,
        line: &str,
    ) -> DateTimeMOpt {
        if let Some(instr) = &self.custom {
            return instr.datetime_from_line(line);
        }
        for instr in DATETIME_PARSE_INSTRS.iter() {
            if let Some(dt) = instr.datetime_from_line(line) {
                return Some(dt);
            }
        }

        None
    }
}

impl Default for TimestampDetector {
    fn default() -> Self {
        TimestampDetector::new()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// datetime construction helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Create a [`DateTimeM`] from a Year, Month, Day, Hour, Minute, Second.
/// Panics on invalid values; intended for tests and known-good constants.
///
/// [`DateTimeM`]: self::DateTimeM
pub fn ymdhms(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> DateTimeM {
    ymdhmsn(year, month, day, hour, minute, second, 0)
}

/// Create a [`DateTimeM`] from a Year, Month, Day, Hour, Minute, Second,
/// Nanosecond. Panics on invalid values; intended for tests and known-good
/// constants.
///
/// [`DateTimeM`]: self::DateTimeM
pub fn ymdhmsn(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
) -> DateTimeM {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_nano_opt(hour, minute, second, nanosecond)
        .unwrap()
}
