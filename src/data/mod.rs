// src/data/mod.rs

//! The representation of log data; datetime recognition rules and the
//! [`LogEntry`].
//!
//! [`LogEntry`]: crate::data::logentry::LogEntry

pub mod datetime;
pub mod logentry;
