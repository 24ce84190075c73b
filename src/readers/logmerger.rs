// src/readers/logmerger.rs

//! Implements a [`LogMerger`],
//! the k-way merge across many [`LogEntryReader`s].
//!
//! [`LogMerger`]: self::LogMerger
//! [`LogEntryReader`s]: crate::readers::logentryreader::LogEntryReader

use std::io::Error;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{Count, FPaths, PathId, ResultNext};
use crate::data::datetime::{DateTimeM, DateTimeMOpt, TimestampDetectorP};
use crate::data::logentry::LogEntry;
use crate::readers::logentryreader::LogEntryReader;
use crate::readers::summary::SourceSummary;

// ---------
// LogMerger

/// [`LogMerger::next_entry`] result: the source's [`PathId`] and its
/// extracted [`LogEntry`], or `Done` when every source is exhausted.
///
/// [`LogMerger::next_entry`]: self::LogMerger#method.next_entry
/// [`PathId`]: crate::common::PathId
/// [`LogEntry`]: crate::data::logentry::LogEntry
pub type ResultNextEntry = ResultNext<(PathId, LogEntry), Error>;

/// A `LogMerger` owns one [`LogEntryReader`] per passed log file and
/// repeatedly selects, across all of them, the buffered entry with the
/// earliest datetime.
///
/// The set of sources is an explicitly ordered `Vec` preserving the order
/// the log files were supplied; that order is load-bearing for the
/// tie-break rule of [`next_entry`].
///
/// Single-threaded and pull-based; the caller drives all progress.
///
/// [`LogEntryReader`]: crate::readers::logentryreader::LogEntryReader
/// [`next_entry`]: self::LogMerger#method.next_entry
#[derive(Debug)]
pub struct LogMerger {
    /// Open sources in input order, each tagged with its stable [`PathId`].
    /// Exhausted sources are removed (and thereby dropped).
    ///
    /// [`PathId`]: crate::common::PathId
    sources: Vec<(PathId, LogEntryReader)>,
    /// Statistics of removed sources, recorded at removal, in removal order.
    /// Covers every source once `next_entry` has returned `Done`.
    summaries: Vec<SourceSummary>,
    /// `Count` of entries handed back by `next_entry`.
    entries_merged: Count,
}

impl LogMerger {
    /// Open every path in `paths`, in order. `PathId` is the position of a
    /// path within `paths`.
    ///
    /// A file with no recognizable datetime at all (including an empty file)
    /// opens successfully as an already-exhausted source; the first
    /// `next_entry` call removes it. A file that cannot be opened is an
    /// error.
    pub fn new(
        paths: &FPaths,
        detector: TimestampDetectorP,
    ) -> std::io::Result<LogMerger> {
        defn!("({:?})", paths);
        let mut sources: Vec<(PathId, LogEntryReader)> = Vec::with_capacity(paths.len());
        for (pathid, path) in paths.iter().enumerate() {
            let ler = LogEntryReader::new(path.clone(), detector.clone())?;
            defo!("opened PathId {} {:?}", pathid, path);
            sources.push((pathid, ler));
        }
        defx!();

        let summaries: Vec<SourceSummary> = Vec::with_capacity(paths.len());

        Ok(LogMerger {
            sources,
            summaries,
            entries_merged: 0,
        })
    }

    /// Find the source with the earliest buffered datetime, extract its
    /// entry (which also primes that source's next entry), and return the
    /// source's `PathId` with the entry. Return `Done` when every source is
    /// exhausted; `Done` is terminal and repeatable.
    ///
    /// Tie-break rule: sources are scanned in input order and the running
    /// minimum is replaced on less-than-**or-equal** comparison, so among
    /// sources tied at the minimal datetime the one supplied LAST wins.
    /// Surprising but long-standing observable behavior; tests pin it.
    pub fn next_entry(&mut self) -> ResultNextEntry {
        defn!();
        // remove exhausted sources first, recording their statistics;
        // dropping a `LogEntryReader` releases any remaining state (its file
        // handle was already dropped at EOF detection)
        let mut index: usize = 0;
        while index < self.sources.len() {
            if self.sources[index].1.is_exhausted() {
                let (pathid, ler) = self.sources.remove(index);
                defo!("remove exhausted PathId {} {:?}", pathid, ler.path());
                self.summaries
                    .push(SourceSummary::from_reader(pathid, &ler));
            } else {
                index += 1;
            }
        }
        if self.sources.is_empty() {
            defx!("return Done");
            return ResultNext::Done;
        }
        let mut index_low: usize = 0;
        let mut dt_low: DateTimeMOpt = None;
        for (index, (_pathid, ler)) in self.sources.iter().enumerate() {
            let dt: DateTimeM = match ler.peek_datetime() {
                Some(val) => val,
                None => {
                    // cannot happen after the removal sweep above
                    debug_assert!(false, "exhausted source survived the removal sweep");
                    continue;
                }
            };
            match dt_low {
                Some(low) if dt > low => {}
                _ => {
                    dt_low = Some(dt);
                    index_low = index;
                }
            }
        }
        let (pathid, ler): &mut (PathId, LogEntryReader) = &mut self.sources[index_low];
        match ler.next_entry() {
            Ok(entry) => {
                self.entries_merged += 1;
                defx!("return Found (PathId {}, dt {:?})", pathid, entry.dt());
                ResultNext::Found((*pathid, entry))
            }
            Err(err) => {
                defx!("return Err");
                ResultNext::Err(err)
            }
        }
    }

    /// Statistics of sources removed from the set so far, in removal order.
    /// Complete once `next_entry` has returned `Done`.
    pub fn summaries(&self) -> &[SourceSummary] {
        &self.summaries
    }

    /// `Count` of entries returned by `next_entry` so far.
    pub fn count_entries_merged(&self) -> Count {
        self.entries_merged
    }

    /// Number of sources not yet removed from the set.
    ///
    /// Only updated by `next_entry` calls; a source that reached end-of-file
    /// remains counted until the sweep at the start of the following call.
    pub fn count_sources(&self) -> usize {
        self.sources.len()
    }
}
