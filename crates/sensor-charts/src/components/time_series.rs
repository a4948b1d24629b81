//! Line charts over the synthetic time axis.

use plotters::coord::Shift;
use plotters::prelude::*;
use sensor_core::models::Reading;

use super::{clock_label, index_range, padded_range, SeriesSpec};
use crate::themes::ChartTheme;

/// Air-quality metrics, scaled so they share one axis.
pub const AIR_QUALITY_SERIES: [SeriesSpec; 3] = [
    SeriesSpec {
        label: "AQI UBA",
        value: |r| f64::from(r.aqi),
    },
    SeriesSpec {
        label: "TVOC (ppb/10)",
        value: |r| f64::from(r.tvoc) / 10.0,
    },
    SeriesSpec {
        label: "ECO2 (ppm/100)",
        value: |r| f64::from(r.eco2) / 100.0,
    },
];

/// Hot-plate resistances in kΩ. Channel 1 is constant and not plotted.
pub const RESISTANCE_SERIES: [SeriesSpec; 3] = [
    SeriesSpec {
        label: "RS0 (k)",
        value: |r| r.rs0 as f64 / 1000.0,
    },
    SeriesSpec {
        label: "RS2 (k)",
        value: |r| r.rs2 as f64 / 1000.0,
    },
    SeriesSpec {
        label: "RS3 (k)",
        value: |r| r.rs3 as f64 / 1000.0,
    },
];

/// AQI, TVOC/10 and ECO2/100 over time.
pub fn draw_air_quality<DB>(
    root: &DrawingArea<DB, Shift>,
    readings: &[Reading],
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    draw_multi_line(
        root,
        readings,
        theme,
        "Air Quality Metrics Over Time",
        "Value",
        &AIR_QUALITY_SERIES,
    )
}

/// RS0, RS2 and RS3 in kΩ over time.
pub fn draw_resistance<DB>(
    root: &DrawingArea<DB, Shift>,
    readings: &[Reading],
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    draw_multi_line(
        root,
        readings,
        theme,
        "Sensor Resistance Values Over Time",
        "Resistance (kΩ)",
        &RESISTANCE_SERIES,
    )
}

fn draw_multi_line<DB>(
    root: &DrawingArea<DB, Shift>,
    readings: &[Reading],
    theme: &ChartTheme,
    title: &str,
    y_desc: &str,
    series: &[SeriesSpec],
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&theme.background)?;

    let y_range = padded_range(
        series
            .iter()
            .flat_map(|spec| readings.iter().map(spec.value)),
    );

    let mut chart = ChartBuilder::on(root)
        .caption(title, theme.caption_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(index_range(readings.len()), y_range)?;

    let clock = |x: &f64| clock_label(readings, *x);
    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc(y_desc)
        .x_label_formatter(&clock)
        .label_style(theme.label_font())
        .axis_desc_style(theme.label_font())
        .axis_style(theme.axis_style())
        .bold_line_style(theme.grid_style())
        .light_line_style(theme.minor_grid_style())
        .draw()?;

    for (spec, color) in series.iter().zip(theme.series.iter().cycle()) {
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                readings
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (i as f64, (spec.value)(r))),
                color.stroke_width(2),
            ))?
            .label(spec.label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&theme.background.mix(0.8))
        .border_style(&theme.foreground)
        .label_font(theme.label_font())
        .draw()?;

    root.present()?;
    Ok(())
}

/// Temperature on the left axis, humidity on the right.
pub fn draw_temperature_humidity<DB>(
    root: &DrawingArea<DB, Shift>,
    readings: &[Reading],
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&theme.background)?;

    let x_range = index_range(readings.len());
    let temp_range = padded_range(readings.iter().map(|r| r.temperature));
    let hum_range = padded_range(readings.iter().map(|r| r.humidity));

    let mut chart = ChartBuilder::on(root)
        .caption("Temperature and Humidity Over Time", theme.caption_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), temp_range)?
        .set_secondary_coord(x_range, hum_range);

    let clock = |x: &f64| clock_label(readings, *x);
    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Temperature (°C)")
        .x_label_formatter(&clock)
        .label_style(theme.label_font())
        .axis_desc_style(theme.label_font_in(theme.temperature))
        .axis_style(theme.axis_style())
        .bold_line_style(theme.grid_style())
        .light_line_style(theme.minor_grid_style())
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("Humidity (%)")
        .label_style(theme.label_font())
        .axis_desc_style(theme.label_font_in(theme.humidity))
        .axis_style(theme.axis_style())
        .draw()?;

    let temperature = theme.temperature;
    chart
        .draw_series(LineSeries::new(
            readings
                .iter()
                .enumerate()
                .map(|(i, r)| (i as f64, r.temperature)),
            temperature.stroke_width(2),
        ))?
        .label("Temperature")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], temperature.stroke_width(2))
        });

    let humidity = theme.humidity;
    chart
        .draw_secondary_series(LineSeries::new(
            readings
                .iter()
                .enumerate()
                .map(|(i, r)| (i as f64, r.humidity)),
            humidity.stroke_width(2),
        ))?
        .label("Humidity")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], humidity.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .background_style(&theme.background.mix(0.8))
        .border_style(&theme.foreground)
        .label_font(theme.label_font())
        .draw()?;

    root.present()?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
