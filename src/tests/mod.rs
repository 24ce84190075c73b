// src/tests/mod.rs

//! Tests for _lmlib_.
//!
//! Tests are placed at `src/tests/`, inside the `lmlib`. Tests placed at a
//! top-level path `tests/` do not have crate-internal visibility, which
//! these tests need.

pub mod common;
pub mod datetime_tests;
pub mod logentry_tests;
pub mod printers_tests;
