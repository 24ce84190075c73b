// src/debug/mod.rs

//! Macros and helpers for error printing, debugging, and testing.

pub mod helpers;
pub mod printers;
