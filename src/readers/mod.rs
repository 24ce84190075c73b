// src/readers/mod.rs

//! The _readers_: [`LogEntryReader`] segments one log file into entries,
//! [`LogMerger`] interleaves entries from many `LogEntryReader`s.
//!
//! [`LogEntryReader`]: crate::readers::logentryreader::LogEntryReader
//! [`LogMerger`]: crate::readers::logmerger::LogMerger

pub mod logentryreader;
pub mod logmerger;
pub mod summary;
