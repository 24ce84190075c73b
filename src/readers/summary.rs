// src/readers/summary.rs

//! Statistics about one processed log source, for the optional `--summary`
//! output.

use crate::common::{Count, FPath, PathId};
use crate::readers::logentryreader::LogEntryReader;

/// Accumulated statistics of one exhausted [`LogEntryReader`], recorded by
/// the [`LogMerger`] at the moment the source is removed from the merge set
/// (the reader itself is dropped then).
///
/// [`LogEntryReader`]: crate::readers::logentryreader::LogEntryReader
/// [`LogMerger`]: crate::readers::logmerger::LogMerger
#[derive(Clone, Debug)]
pub struct SourceSummary {
    pub pathid: PathId,
    pub path: FPath,
    /// `Count` of entries extracted from this source.
    pub entries: Count,
    /// `Count` of lines read from this source.
    pub lines: Count,
    /// `Count` of unparseable leading lines dropped at open.
    pub lines_dropped: Count,
}

impl SourceSummary {
    pub fn from_reader(
        pathid: PathId,
        ler: &LogEntryReader,
    ) -> SourceSummary {
        SourceSummary {
            pathid,
            path: ler.path().clone(),
            entries: ler.count_entries_processed(),
            lines: ler.count_lines_processed(),
            lines_dropped: ler.count_lines_dropped(),
        }
    }
}
