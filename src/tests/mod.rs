// src/tests/mod.rs

//! Tests for _ntblib_.
//!
//! Tests are placed at `src/tests/`, inside the `ntblib`, for access to
//! crate-internal items.

pub mod common;
pub mod filesize_tests;
pub mod linematcher_tests;
pub mod topn_tests;
