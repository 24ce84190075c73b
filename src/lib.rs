// src/lib.rs

//! Library _lmlib_ for the log merging program _lm_.
//!
//! A log file is segmented into [`LogEntry`] instances by a
//! [`LogEntryReader`]. A [`LogMerger`] holds one `LogEntryReader` per passed
//! log file and repeatedly hands back the `LogEntry` with the earliest
//! datetime among all of them.
//!
//! [`LogEntry`]: crate::data::logentry::LogEntry
//! [`LogEntryReader`]: crate::readers::logentryreader::LogEntryReader
//! [`LogMerger`]: crate::readers::logmerger::LogMerger

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
