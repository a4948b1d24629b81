//! TVOC vs ECO2 correlation.

use plotters::coord::Shift;
use plotters::prelude::*;
use sensor_core::models::Reading;

use super::padded_range;
use crate::themes::ChartTheme;

/// Position of `aqi` inside `[min, max]`, `0.0` when the range is flat.
pub fn aqi_position(aqi: u32, min: u32, max: u32) -> f64 {
    if max <= min {
        return 0.0;
    }
    f64::from(aqi.saturating_sub(min)) / f64::from(max - min)
}

/// Scatter of TVOC against ECO2, one colour per AQI code.
///
/// Each distinct code gets its own legend entry in place of a colour bar.
pub fn draw_tvoc_vs_eco2<DB>(
    root: &DrawingArea<DB, Shift>,
    readings: &[Reading],
    theme: &ChartTheme,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&theme.background)?;

    let x_range = padded_range(readings.iter().map(|r| f64::from(r.tvoc)));
    let y_range = padded_range(readings.iter().map(|r| f64::from(r.eco2)));

    let mut chart = ChartBuilder::on(root)
        .caption("Correlation Between TVOC and ECO2", theme.caption_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("TVOC (ppb)")
        .y_desc("ECO2 (ppm)")
        .label_style(theme.label_font())
        .axis_desc_style(theme.label_font())
        .axis_style(theme.axis_style())
        .bold_line_style(theme.grid_style())
        .light_line_style(theme.minor_grid_style())
        .draw()?;

    let mut codes: Vec<u32> = readings.iter().map(|r| r.aqi).collect();
    codes.sort_unstable();
    codes.dedup();
    let (Some(&min), Some(&max)) = (codes.first(), codes.last()) else {
        root.present()?;
        return Ok(());
    };

    for code in codes {
        let color = theme.scatter_map.sample(aqi_position(code, min, max));
        chart
            .draw_series(
                readings
                    .iter()
                    .filter(|r| r.aqi == code)
                    .map(|r| {
                        Circle::new(
                            (f64::from(r.tvoc), f64::from(r.eco2)),
                            5,
                            color.mix(0.7).filled(),
                        )
                    }),
            )?
            .label(format!("AQI {code}"))
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&theme.background.mix(0.8))
        .border_style(&theme.foreground)
        .label_font(theme.label_font())
        .draw()?;

    root.present()?;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
