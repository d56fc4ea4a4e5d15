// src/debug/mod.rs

//! The `debug` module is print macros for errors and warnings, and helper
//! functions for debug builds and test builds.

#[cfg(test)]
pub mod helpers;

pub mod printers;
