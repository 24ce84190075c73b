// src/data/logentry.rs

//! Implements a [`LogEntry`] struct, the atomic unit of the merge.
//!
//! [`LogEntry`]: crate::data::logentry::LogEntry

use std::fmt;

use crate::common::Count;
use crate::data::datetime::DateTimeM;

// --------
// LogEntry

/// Lines of text as they appeared in the log file, including their original
/// line terminators (the final line of a file may lack one).
pub type Lines = Vec<String>;

/// A `LogEntry` is one or more [`Lines`]: the first line begins with a
/// recognized datetime, stored parsed in field `dt`; any following lines are
/// continuation lines with no recognized datetime of their own (stack traces,
/// wrapped output, and so on).
///
/// A `LogEntry` is emitted whole; its lines never interleave with lines of
/// another source's entry.
///
/// [`Lines`]: self::Lines
pub struct LogEntry {
    /// The one or more lines that make up the entry.
    lines: Lines,
    /// Parsed datetime of the first line.
    dt: DateTimeM,
}

impl fmt::Debug for LogEntry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("dt", &self.dt)
            .field("lines.len", &self.lines.len())
            .field("first line", self.lines.first().unwrap_or(&String::new()))
            .finish()
    }
}

impl LogEntry {
    /// Default [`with_capacity`] for `lines`; most log entries are a single
    /// line.
    ///
    /// [`with_capacity`]: std::vec::Vec#method.with_capacity
    const LINES_WITH_CAPACITY: usize = 1;

    /// Create a `LogEntry` from its datetime-bearing first line.
    pub fn new(
        first_line: String,
        dt: DateTimeM,
    ) -> LogEntry {
        let mut lines = Lines::with_capacity(LogEntry::LINES_WITH_CAPACITY);
        lines.push(first_line);

        LogEntry { lines, dt }
    }

    /// Append a continuation line.
    pub fn push_line(
        &mut self,
        line: String,
    ) {
        self.lines.push(line);
    }

    /// The parsed datetime of the first line.
    pub fn dt(&self) -> &DateTimeM {
        &self.dt
    }

    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    /// `Count` of lines in this entry, always at least 1.
    pub fn count_lines(&self) -> Count {
        self.lines.len() as Count
    }

    /// `String` of all lines concatenated, exactly as they would print
    /// without prefixing or coloring.
    #[allow(non_snake_case)]
    #[cfg(any(debug_assertions, test))]
    pub fn to_String(&self) -> String {
        let mut s = String::with_capacity(self.lines.iter().map(|line| line.len()).sum());
        for line in self.lines.iter() {
            s.push_str(line);
        }

        s
    }
}
