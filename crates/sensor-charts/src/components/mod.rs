//! Individual chart drawings and the axis helpers they share.

pub mod distribution;
pub mod heatmap;
pub mod scatter;
pub mod time_series;

use std::ops::Range;

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use sensor_core::formatting::format_clock;
use sensor_core::models::Reading;

/// Chart canvas size in pixels for time-series plots.
pub const WIDE: (u32, u32) = (1200, 600);
/// Canvas for the scatter plot.
pub const SQUARE: (u32, u32) = (1000, 800);
/// Canvas for the bar chart.
pub const SMALL: (u32, u32) = (800, 600);
/// Canvas for the heatmap.
pub const TALL: (u32, u32) = (1200, 800);

/// One plotted metric: legend label plus accessor.
#[derive(Clone, Copy)]
pub struct SeriesSpec {
    pub label: &'static str,
    pub value: fn(&Reading) -> f64,
}

impl std::fmt::Debug for SeriesSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesSpec").field("label", &self.label).finish()
    }
}

/// Continuous `f64` axis whose ticks sit exactly at `keys`.
///
/// Used for category and heatmap axes where every tick is one bar or cell.
#[derive(Clone)]
pub struct KeyPointAxis {
    coord: RangedCoordf64,
    keys: Vec<f64>,
}

impl std::fmt::Debug for KeyPointAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPointAxis")
            .field("range", &self.coord.range())
            .field("keys", &self.keys)
            .finish()
    }
}

impl KeyPointAxis {
    pub fn new(range: Range<f64>, keys: Vec<f64>) -> Self {
        Self {
            coord: range.into(),
            keys,
        }
    }

    /// Axis over `-0.5..n-0.5` with a tick on each given index.
    pub fn cells(n: usize, ticks: impl IntoIterator<Item = usize>) -> Self {
        Self::new(
            -0.5..n as f64 - 0.5,
            ticks.into_iter().map(|i| i as f64).collect(),
        )
    }
}

impl Ranged for KeyPointAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.coord.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.keys.clone()
    }

    fn range(&self) -> Range<f64> {
        self.coord.range()
    }
}

/// X range covering reading indices `0..n-1`, never degenerate.
pub fn index_range(n: usize) -> Range<f64> {
    let end = n.saturating_sub(1).max(1) as f64;
    0.0..end
}

/// Y range spanning `values` with 5 % headroom on both sides.
///
/// A flat or empty series gets a unit-wide band around its value.
pub fn padded_range<I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// `HH:MM:SS` label for the reading nearest to index `x`; empty off-range.
pub fn clock_label(readings: &[Reading], x: f64) -> String {
    if !x.is_finite() || x < -0.5 {
        return String::new();
    }
    readings
        .get(x.round() as usize)
        .map(|r| format_clock(&r.timestamp))
        .unwrap_or_default()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
