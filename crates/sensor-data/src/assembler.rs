//! Synthetic timestamps.
//!
//! The console log carries no clock, so readings are assumed to be one second
//! apart and to end at the moment of analysis.

use chrono::{Duration, Local, NaiveDateTime, SubsecRound};
use sensor_core::models::{Measurement, Reading};

/// Interval assumed between consecutive readings.
pub const READING_INTERVAL_SECS: i64 = 1;

/// Attach timestamps to `measurements` relative to the current local time.
pub fn assemble(measurements: Vec<Measurement>) -> Vec<Reading> {
    assemble_at(measurements, Local::now().naive_local())
}

/// Attach timestamps back-dated from `now`.
///
/// `now` is truncated to whole seconds; the first reading is stamped
/// `now - N s` and each following one a further second later, so the last
/// reading lands one second before `now`.
pub fn assemble_at(measurements: Vec<Measurement>, now: NaiveDateTime) -> Vec<Reading> {
    let interval = Duration::seconds(READING_INTERVAL_SECS);
    let start = now.trunc_subsecs(0) - interval * measurements.len() as i32;

    measurements
        .into_iter()
        .enumerate()
        .map(|(i, m)| m.at(start + interval * i as i32))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
