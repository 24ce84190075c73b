// src/printer/mod.rs

//! Renders merged [`LogEntry`s] to the terminal, with optional per-source
//! prefixing and coloring.
//!
//! [`LogEntry`s]: crate::data::logentry::LogEntry

pub mod printers;
