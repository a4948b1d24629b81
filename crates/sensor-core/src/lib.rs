//! Shared types for the sensor log tooling.
//!
//! Holds the reading model, AQI categories, the error type, CLI settings and
//! small formatting helpers used by the data, chart and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
