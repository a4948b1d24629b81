//! AQI category bar chart.

use std::collections::BTreeMap;

use plotters::coord::Shift;
use plotters::prelude::*;
use sensor_core::models::{AqiCategory, Reading};

use super::KeyPointAxis;
use crate::themes::ChartTheme;

/// One bar: axis label and count, ordered by AQI code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub count: usize,
}

/// Count readings per AQI code. Codes 1–5 are labelled by category, any
/// other code by its number.
pub fn category_bars(readings: &[Reading]) -> Vec<Bar> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for r in readings {
        *counts.entry(r.aqi).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(code, count)| {
            let label = match AqiCategory::from_code(code) {
                AqiCategory::Unknown => code.to_string(),
                category => category.label().to_string(),
            };
            Bar { label, count }
        })
        .collect()
}

/// Bar chart of how often each AQI category occurs.
pub fn draw_aqi_distribution<DB>(
    root: &DrawingArea<DB, Shift>,
    readings: &[Reading],
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&theme.background)?;

    let bars = category_bars(readings);
    let tallest = bars.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(
            "Distribution of Air Quality Index Readings",
            theme.caption_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            KeyPointAxis::cells(bars.len(), 0..bars.len()),
            0.0..tallest * 1.1,
        )?;

    let label_for = |x: &f64| {
        bars.get(x.round().max(0.0) as usize)
            .map(|b| b.label.clone())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("AQI UBA Category")
        .y_desc("Count")
        .x_label_formatter(&label_for)
        .label_style(theme.label_font())
        .axis_desc_style(theme.label_font())
        .axis_style(theme.axis_style())
        .bold_line_style(theme.grid_style())
        .light_line_style(theme.minor_grid_style())
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.4, 0.0), (x + 0.4, bar.count as f64)],
            theme.bar.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
