//! Core library for the `pulse` CLI.
//!
//! `pulse` sends one HTTP request template N times, sequentially or in
//! parallel with an optional connection bound, shows live progress, and
//! summarizes the run with outlier-filtered latency and size statistics
//! before exporting the distinct responses. The binary is a thin wrapper
//! over [`entry::run`].
mod app;
pub mod args;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod entry;
pub mod error;
pub mod export;
pub mod http;
pub mod monitor;
pub mod summary;
pub mod system;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;

#[cfg(test)]
mod test_support;
