//! Normalised sensor heatmap.

use plotters::coord::Shift;
use plotters::prelude::*;
use sensor_core::models::Reading;

use super::{clock_label, KeyPointAxis, SeriesSpec};
use crate::themes::ChartTheme;

/// Heatmap rows, top to bottom.
pub const HEATMAP_ROWS: [SeriesSpec; 6] = [
    SeriesSpec {
        label: "TVOC",
        value: |r| f64::from(r.tvoc),
    },
    SeriesSpec {
        label: "ECO2",
        value: |r| f64::from(r.eco2),
    },
    SeriesSpec {
        label: "RS0",
        value: |r| r.rs0 as f64,
    },
    SeriesSpec {
        label: "RS2",
        value: |r| r.rs2 as f64,
    },
    SeriesSpec {
        label: "RS3",
        value: |r| r.rs3 as f64,
    },
    SeriesSpec {
        label: "AQI",
        value: |r| f64::from(r.aqi),
    },
];

/// Number of labelled ticks on the time axis.
pub const TIME_TICKS: usize = 10;

/// Width in pixels reserved for the colour scale.
const SCALE_WIDTH: i32 = 110;

/// Each row of [`HEATMAP_ROWS`] divided by its own maximum.
///
/// A row whose maximum is zero stays all zeros.
pub fn normalized_rows(readings: &[Reading]) -> Vec<Vec<f64>> {
    HEATMAP_ROWS
        .iter()
        .map(|spec| {
            let values: Vec<f64> = readings.iter().map(spec.value).collect();
            let max = values.iter().copied().fold(0.0_f64, f64::max);
            if max > 0.0 {
                values.into_iter().map(|v| v / max).collect()
            } else {
                vec![0.0; values.len()]
            }
        })
        .collect()
}

/// Ten evenly spaced indices over `0..n`, truncated to integers.
///
/// Short series yield repeated positions, which are collapsed.
pub fn tick_positions(n: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let last = n - 1;
    let mut ticks: Vec<usize> = (0..TIME_TICKS)
        .map(|i| i * last / (TIME_TICKS - 1))
        .collect();
    ticks.dedup();
    ticks
}

/// One row per metric, one column per reading, coloured by normalised value.
pub fn draw_sensor_heatmap<DB>(
    root: &DrawingArea<DB, Shift>,
    readings: &[Reading],
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&theme.background)?;

    let (width, _) = root.dim_in_pixel();
    let (plot_area, scale_area) = root.split_horizontally(width as i32 - SCALE_WIDTH);

    let rows = normalized_rows(readings);
    let n = readings.len();
    let last_row = (HEATMAP_ROWS.len() - 1) as f64;

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(
            "Sensor Reading Patterns Over Time (Normalized)",
            theme.caption_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            KeyPointAxis::cells(n, tick_positions(n)),
            KeyPointAxis::cells(HEATMAP_ROWS.len(), 0..HEATMAP_ROWS.len()),
        )?;

    let clock = |x: &f64| clock_label(readings, *x);
    let row_label = |y: &f64| {
        let row = last_row - y.round();
        if row < 0.0 {
            return String::new();
        }
        HEATMAP_ROWS
            .get(row as usize)
            .map(|spec| spec.label.to_string())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Time")
        .x_label_formatter(&clock)
        .y_label_formatter(&row_label)
        .label_style(theme.label_font())
        .axis_desc_style(theme.label_font())
        .axis_style(theme.axis_style())
        .draw()?;

    for (r, row) in rows.iter().enumerate() {
        let y = last_row - r as f64;
        chart.draw_series(row.iter().enumerate().map(|(i, &v)| {
            let x = i as f64;
            Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                theme.heatmap_map.sample(v).filled(),
            )
        }))?;
    }

    draw_color_scale(&scale_area, theme)?;

    root.present()?;
    Ok(())
}

/// Vertical 0–1 colour scale next to the heatmap.
fn draw_color_scale<DB>(area: &DrawingArea<DB, Shift>, theme: &ChartTheme) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    const STEPS: usize = 50;

    let mut scale = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(55)
        .margin_right(10)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;

    scale
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("Normalized Value")
        .y_labels(6)
        .label_style(theme.label_font())
        .axis_desc_style(theme.label_font())
        .axis_style(theme.axis_style())
        .draw()?;

    scale.draw_series((0..STEPS).map(|i| {
        let lo = i as f64 / STEPS as f64;
        let hi = (i + 1) as f64 / STEPS as f64;
        Rectangle::new(
            [(0.0, lo), (1.0, hi)],
            theme.heatmap_map.sample((lo + hi) / 2.0).filled(),
        )
    }))?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
