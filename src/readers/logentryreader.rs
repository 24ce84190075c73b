// src/readers/logentryreader.rs

//! Implements a [`LogEntryReader`],
//! the driver of deriving [`LogEntry`s] from one log file.
//!
//! [`LogEntryReader`]: self::LogEntryReader
//! [`LogEntry`s]: crate::data::logentry::LogEntry

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind, Result};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{Count, FPath};
use crate::data::datetime::{DateTimeM, DateTimeMOpt, TimestampDetectorP};
use crate::data::logentry::LogEntry;

// --------------
// LogEntryReader

/// A `LogEntryReader` wraps one open log file and segments it into a
/// sequence of [`LogEntry`] instances using a shared [`TimestampDetector`].
///
/// Read-ahead invariant: whenever the reader is not exhausted it holds the
/// first line and parsed datetime of the entry that the next [`next_entry`]
/// call will return. The invariant is established at construction (reading
/// forward past any unparseable leading lines) and re-established after
/// every extraction. Consequently [`peek_datetime`] never performs I/O.
///
/// Exhaustion is terminal. The underlying file handle is released at the
/// moment end-of-file is detected, exactly once.
///
/// [`LogEntry`]: crate::data::logentry::LogEntry
/// [`TimestampDetector`]: crate::data::datetime::TimestampDetector
/// [`next_entry`]: self::LogEntryReader#method.next_entry
/// [`peek_datetime`]: self::LogEntryReader#method.peek_datetime
pub struct LogEntryReader {
    path: FPath,
    /// `Some` while the file is open. `take`n when end-of-file is detected
    /// so the handle is dropped exactly once.
    reader: Option<BufReader<File>>,
    detector: TimestampDetectorP,
    /// Buffered first line of the next entry; only meaningful while
    /// `dt_buffered` is `Some`.
    line_buffered: String,
    /// Buffered parsed datetime of the next entry.
    /// `None` means this reader is exhausted.
    dt_buffered: DateTimeMOpt,
    /// `Count` of entries returned by `next_entry`.
    entries_processed: Count,
    /// `Count` of lines read from the file.
    lines_processed: Count,
    /// `Count` of unparseable leading lines silently dropped at construction.
    lines_dropped: Count,
}

impl fmt::Debug for LogEntryReader {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LogEntryReader")
            .field("path", &self.path)
            .field("exhausted?", &self.is_exhausted())
            .field("dt_buffered", &self.dt_buffered)
            .field("entries_processed", &self.entries_processed)
            .field("lines_processed", &self.lines_processed)
            .field("lines_dropped", &self.lines_dropped)
            .finish()
    }
}

impl LogEntryReader {
    /// Open the log file at `path` and read forward to the first line with a
    /// recognizable datetime, establishing the read-ahead invariant.
    ///
    /// Any lines before the first datetime-bearing line (header banners and
    /// the like) are silently dropped; they are counted in
    /// [`count_lines_dropped`]. A file that ends before any datetime-bearing
    /// line yields a reader that starts exhausted; that is not an error.
    ///
    /// [`count_lines_dropped`]: self::LogEntryReader#method.count_lines_dropped
    pub fn new(
        path: FPath,
        detector: TimestampDetectorP,
    ) -> Result<LogEntryReader> {
        defn!("({:?})", path);
        let file: File = match File::open(&path) {
            Ok(val) => val,
            Err(err) => {
                defx!("return Err");
                return Err(Error::new(err.kind(), format!("{} for file {:?}", err, path)));
            }
        };
        let mut ler = LogEntryReader {
            path,
            reader: Some(BufReader::new(file)),
            detector,
            line_buffered: String::new(),
            dt_buffered: None,
            entries_processed: 0,
            lines_processed: 0,
            lines_dropped: 0,
        };
        ler.scan_to_first_entry()?;
        defx!("exhausted? {}, lines_dropped {}", ler.is_exhausted(), ler.lines_dropped);

        Ok(ler)
    }

    /// Read one line from the file, including its trailing newline if
    /// present. `Ok(None)` means end-of-file was reached; the file handle
    /// has been released.
    fn read_line1(&mut self) -> Result<Option<String>> {
        let reader: &mut BufReader<File> = match self.reader.as_mut() {
            Some(val) => val,
            None => return Ok(None),
        };
        let mut line = String::new();
        let sz: usize = match reader.read_line(&mut line) {
            Ok(val) => val,
            Err(err) => {
                return Err(Error::new(err.kind(), format!("{} for file {:?}", err, self.path)));
            }
        };
        if sz == 0 {
            // end-of-file; release the file handle, exactly once
            defo!("EOF {:?}", self.path);
            self.reader = None;
            return Ok(None);
        }
        self.lines_processed += 1;

        Ok(Some(line))
    }

    /// Read and drop lines until one is recognized as beginning an entry,
    /// then buffer it. Called once, from `new`.
    fn scan_to_first_entry(&mut self) -> Result<()> {
        loop {
            let line: String = match self.read_line1()? {
                Some(val) => val,
                // EOF before any datetime-bearing line; start exhausted
                None => return Ok(()),
            };
            match self.detector.datetime_from_line(&line) {
                Some(dt) => {
                    self.line_buffered = line;
                    self.dt_buffered = Some(dt);
                    return Ok(());
                }
                None => {
                    defo!("drop leading line {:?}", line);
                    self.lines_dropped += 1;
                }
            }
        }
    }

    /// Is this reader out of entries? Terminal once `true`.
    pub fn is_exhausted(&self) -> bool {
        self.dt_buffered.is_none()
    }

    /// The datetime of the entry the next `next_entry` call will return,
    /// or `None` when exhausted. Performs no I/O.
    pub fn peek_datetime(&self) -> DateTimeMOpt {
        self.dt_buffered
    }

    /// Return the buffered entry: its first line plus every following line
    /// that does not itself begin an entry. The first line that does begin
    /// an entry becomes the new buffered line and datetime, re-establishing
    /// the read-ahead invariant. If the file ends first then this reader
    /// becomes exhausted and the accumulated lines are still returned.
    ///
    /// Calling this on an exhausted reader is a programming error.
    pub fn next_entry(&mut self) -> Result<LogEntry> {
        defn!("({:?})", self.path);
        debug_assert!(
            !self.is_exhausted(),
            "next_entry() called on exhausted LogEntryReader, file {:?}",
            self.path,
        );
        let dt: DateTimeM = match self.dt_buffered.take() {
            Some(val) => val,
            None => {
                defx!("return Err (exhausted)");
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    format!("next_entry() called on exhausted reader of file {:?}", self.path),
                ));
            }
        };
        let first_line: String = std::mem::take(&mut self.line_buffered);
        let mut entry = LogEntry::new(first_line, dt);
        loop {
            let line: String = match self.read_line1()? {
                Some(val) => val,
                // EOF; the reader is now exhausted
                None => break,
            };
            match self.detector.datetime_from_line(&line) {
                Some(dt_next) => {
                    // first line of the following entry
                    self.line_buffered = line;
                    self.dt_buffered = Some(dt_next);
                    break;
                }
                None => entry.push_line(line),
            }
        }
        self.entries_processed += 1;
        defx!("return entry, {} lines, dt {:?}", entry.count_lines(), entry.dt());

        Ok(entry)
    }

    pub fn path(&self) -> &FPath {
        &self.path
    }

    /// `Count` of entries returned so far.
    pub fn count_entries_processed(&self) -> Count {
        self.entries_processed
    }

    /// `Count` of lines read from the file so far.
    pub fn count_lines_processed(&self) -> Count {
        self.lines_processed
    }

    /// `Count` of unparseable leading lines dropped at construction.
    pub fn count_lines_dropped(&self) -> Count {
        self.lines_dropped
    }
}
