//! Data ingestion layer for the sensor log tooling.
//!
//! Responsible for locating and decoding console logs, correlating the three
//! interleaved line formats into readings, stamping them with synthetic time
//! and computing summary statistics.

pub mod analysis;
pub mod assembler;
pub mod decoder;
pub mod locator;
pub mod parser;
pub mod statistics;

pub use sensor_core as core;
