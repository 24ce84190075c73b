// src/printer/printers.rs

//! Specialized printer struct [`PrinterLogEntry`] and helper functions
//! for printing [`LogEntry`s].
//!
//! [`PrinterLogEntry`]: self::PrinterLogEntry
//! [`LogEntry`s]: crate::data::logentry::LogEntry

use std::io::{Result, Write};

#[doc(hidden)]
pub use ::termcolor::{Color, ColorChoice, ColorSpec, WriteColor};
use ::termcolor::StandardStream;

use crate::common::PathId;
use crate::data::logentry::LogEntry;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// globals and constants
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`Color`] for printing some user-facing error messages.
///
/// [`Color`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.Color.html
pub const COLOR_ERROR: Color = Color::Red;

/// Newline as bytes, the only line terminator recognized for the
/// color-reset placement rule.
const NL: &[u8] = b"\n";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Sequential 256-color assignment per source: the first source gets color
/// index 1, the second index 2, and so on (wrapping past 255). Rendered by
/// `termcolor` as the SGR escape `ESC[38;5;{index}m`.
pub const fn color_for_source(pathid: PathId) -> Color {
    Color::Ansi256((1 + (pathid % 255)) as u8)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// PrinterLogEntry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Aliased [`Result`] returned by [`PrinterLogEntry`] print functions;
/// `Ok` holds the count of bytes printed.
///
/// [`Result`]: std::io::Result
/// [`PrinterLogEntry`]: self::PrinterLogEntry
pub type PrinterLogEntryResult = Result<usize>;

/// A printer for the [`LogEntry`s] of one source, created once per source
/// and holding that source's prefix text and color.
///
/// Rendering of one line: optional prefix, then the line content; when
/// colorized the color starts before the prefix and is reset before the
/// trailing newline when the line has one, after the content otherwise.
///
/// [`LogEntry`s]: crate::data::logentry::LogEntry
pub struct PrinterLogEntry {
    stdout_color: StandardStream,
    do_color: bool,
    /// color of printed log entries, built once in `new`
    color_spec_entry: ColorSpec,
    /// prefix text printed before every line, trailing separator included
    prefix: Option<String>,
}

/// Macro helper to [`PrinterLogEntry`] functions.
///
/// [`PrinterLogEntry`]: self::PrinterLogEntry
macro_rules! write_or_return {
    ($stream:expr, $slice:expr, $printed:expr) => {{
        match $stream.write_all($slice) {
            Ok(_) => {
                $printed += $slice.len();
            }
            Err(err) => {
                return PrinterLogEntryResult::Err(err);
            }
        }
    }};
}

impl PrinterLogEntry {
    /// Create a new `PrinterLogEntry`.
    ///
    /// `color_entry` should come from [`color_for_source`]; it is only
    /// used when `color_choice` enables coloring.
    ///
    /// [`color_for_source`]: self::color_for_source
    pub fn new(
        color_choice: ColorChoice,
        color_entry: Color,
        prefix: Option<String>,
    ) -> PrinterLogEntry {
        let stdout_color = StandardStream::stdout(color_choice);
        let do_color: bool = match color_choice {
            ColorChoice::Never => false,
            ColorChoice::Always | ColorChoice::AlwaysAnsi | ColorChoice::Auto => true,
        };
        let mut color_spec_entry: ColorSpec = ColorSpec::new();
        color_spec_entry.set_fg(Some(color_entry));

        PrinterLogEntry {
            stdout_color,
            do_color,
            color_spec_entry,
            prefix,
        }
    }

    /// Prints the [`LogEntry`] based on `PrinterLogEntry` settings.
    ///
    /// Users should call this function.
    ///
    /// [`LogEntry`]: crate::data::logentry::LogEntry
    #[inline(always)]
    pub fn print_logentry(
        &mut self,
        entry: &LogEntry,
    ) -> PrinterLogEntryResult {
        match self.do_color {
            false => self.print_logentry_(entry),
            true => self.print_logentry_color(entry),
        }
    }

    /// Print a [`LogEntry`] without coloring, prefix if set.
    ///
    /// [`LogEntry`]: crate::data::logentry::LogEntry
    fn print_logentry_(
        &mut self,
        entry: &LogEntry,
    ) -> PrinterLogEntryResult {
        let mut printed: usize = 0;
        for line in entry.lines().iter() {
            if let Some(prefix) = &self.prefix {
                write_or_return!(self.stdout_color, prefix.as_bytes(), printed);
            }
            write_or_return!(self.stdout_color, line.as_bytes(), printed);
        }
        self.stdout_color.flush()?;

        PrinterLogEntryResult::Ok(printed)
    }

    /// Print a [`LogEntry`] in this source's color, prefix if set.
    ///
    /// The color starts before the prefix. The reset escape is placed before
    /// a trailing newline when the line ends in one, else written after the
    /// line content.
    ///
    /// [`LogEntry`]: crate::data::logentry::LogEntry
    fn print_logentry_color(
        &mut self,
        entry: &LogEntry,
    ) -> PrinterLogEntryResult {
        let mut printed: usize = 0;
        for line in entry.lines().iter() {
            self.stdout_color.set_color(&self.color_spec_entry)?;
            if let Some(prefix) = &self.prefix {
                write_or_return!(self.stdout_color, prefix.as_bytes(), printed);
            }
            match line.strip_suffix('\n') {
                Some(content) => {
                    write_or_return!(self.stdout_color, content.as_bytes(), printed);
                    self.stdout_color.reset()?;
                    write_or_return!(self.stdout_color, NL, printed);
                }
                None => {
                    write_or_return!(self.stdout_color, line.as_bytes(), printed);
                    self.stdout_color.reset()?;
                }
            }
        }
        self.stdout_color.flush()?;

        PrinterLogEntryResult::Ok(printed)
    }
}
