// src/tests/common.rs

//! Common helpers and fixture data for testing.

use crate::common::FPaths;
use crate::data::datetime::{TimestampDetector, TimestampDetectorP};
use crate::debug::helpers::{create_temp_file, ntf_fpath, NamedTempFile};
use crate::readers::logentryreader::LogEntryReader;
use crate::readers::logmerger::LogMerger;

/// Two entries in the slash-delimited fractional-second form, the second
/// entry with one continuation line, final line unterminated.
pub const DATA_SLASHED_2_ENTRIES: &str = "\
2023/01/02 03:04:05.678901 entry one
2023/01/02 03:04:06.000000 entry two
continuation of entry two";

/// An epoch-form log with banner lines before the first entry.
pub const DATA_EPOCH_LEADING_JUNK: &str = "\
banner line, no datetime
second banner line
10 first entry
11 second entry
";

/// A detector with the built-in rule chain, shareable among readers.
pub fn new_detector() -> TimestampDetectorP {
    TimestampDetectorP::new(TimestampDetector::new())
}

/// Write `data` to a temporary file and open a `LogEntryReader` on it with
/// the built-in rule chain. The `NamedTempFile` must be kept alive by the
/// caller for the lifetime of the reader.
pub fn new_logentryreader(data: &str) -> (NamedTempFile, LogEntryReader) {
    new_logentryreader_w_detector(data, new_detector())
}

/// `new_logentryreader` with a caller-supplied detector.
pub fn new_logentryreader_w_detector(
    data: &str,
    detector: TimestampDetectorP,
) -> (NamedTempFile, LogEntryReader) {
    let ntf = create_temp_file(data);
    let ler = LogEntryReader::new(ntf_fpath(&ntf), detector)
        .expect("LogEntryReader::new failed");

    (ntf, ler)
}

/// Write each `str` of `datas` to its own temporary file and open a
/// `LogMerger` over all of them, in order, with the built-in rule chain.
pub fn new_logmerger(datas: &[&str]) -> (Vec<NamedTempFile>, LogMerger) {
    let ntfs: Vec<NamedTempFile> = datas
        .iter()
        .map(|data| create_temp_file(data))
        .collect();
    let paths: FPaths = ntfs.iter().map(ntf_fpath).collect();
    let merger = LogMerger::new(&paths, new_detector()).expect("LogMerger::new failed");

    (ntfs, merger)
}
