//! Writes every chart into the output directory.

use std::fmt;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use sensor_core::error::{Result, SensorError};
use sensor_core::models::Reading;
use tracing::{debug, info, warn};

use crate::components::{distribution, heatmap, scatter, time_series};
use crate::components::{SMALL, SQUARE, TALL, WIDE};
use crate::themes::ChartTheme;

/// The six charts produced for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    AirQuality,
    Resistance,
    TemperatureHumidity,
    TvocVsEco2,
    AqiDistribution,
    SensorHeatmap,
}

impl ChartKind {
    /// Render order.
    pub const ALL: [ChartKind; 6] = [
        ChartKind::AirQuality,
        ChartKind::Resistance,
        ChartKind::TemperatureHumidity,
        ChartKind::TvocVsEco2,
        ChartKind::AqiDistribution,
        ChartKind::SensorHeatmap,
    ];

    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::AirQuality => "air_quality_metrics",
            ChartKind::Resistance => "resistance_values",
            ChartKind::TemperatureHumidity => "temperature_humidity",
            ChartKind::TvocVsEco2 => "tvoc_vs_eco2",
            ChartKind::AqiDistribution => "aqi_distribution",
            ChartKind::SensorHeatmap => "sensor_patterns_heatmap",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.svg", self.file_stem())
    }

    /// Canvas size in pixels.
    pub fn size(self) -> (u32, u32) {
        match self {
            ChartKind::AirQuality | ChartKind::Resistance | ChartKind::TemperatureHumidity => WIDE,
            ChartKind::TvocVsEco2 => SQUARE,
            ChartKind::AqiDistribution => SMALL,
            ChartKind::SensorHeatmap => TALL,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Outcome of [`ChartRenderer::render_all`].
#[derive(Debug, Default)]
pub struct RenderReport {
    /// Files written, in render order.
    pub written: Vec<PathBuf>,
    /// Charts that failed, with the error that stopped them.
    pub failed: Vec<(ChartKind, SensorError)>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Renders charts for one dataset into `output_dir`.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    theme: ChartTheme,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            theme: ChartTheme::default(),
        }
    }

    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render a single chart and return the path written.
    ///
    /// The output directory must already exist.
    pub fn render(&self, kind: ChartKind, readings: &[Reading]) -> Result<PathBuf> {
        let path = self.output_dir.join(kind.file_name());
        debug!(chart = %kind, path = %path.display(), "Rendering chart");

        self.draw(kind, &path, readings)
            .map_err(|source| SensorError::Render {
                chart: kind.to_string(),
                source,
            })?;

        Ok(path)
    }

    /// Create the output directory and render every chart.
    ///
    /// A failing chart is logged and recorded; the remaining charts are still
    /// attempted.
    pub fn render_all(&self, readings: &[Reading]) -> Result<RenderReport> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| SensorError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut report = RenderReport::default();
        for kind in ChartKind::ALL {
            match self.render(kind, readings) {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    warn!(chart = %kind, error = %e, "Chart rendering failed");
                    report.failed.push((kind, e));
                }
            }
        }

        info!(
            written = report.written.len(),
            failed = report.failed.len(),
            dir = %self.output_dir.display(),
            "Charts rendered"
        );
        Ok(report)
    }

    fn draw(&self, kind: ChartKind, path: &Path, readings: &[Reading]) -> anyhow::Result<()> {
        if readings.is_empty() {
            anyhow::bail!("no readings to plot");
        }

        let root = SVGBackend::new(path, kind.size()).into_drawing_area();
        let theme = &self.theme;
        match kind {
            ChartKind::AirQuality => time_series::draw_air_quality(&root, readings, theme),
            ChartKind::Resistance => time_series::draw_resistance(&root, readings, theme),
            ChartKind::TemperatureHumidity => {
                time_series::draw_temperature_humidity(&root, readings, theme)
            }
            ChartKind::TvocVsEco2 => scatter::draw_tvoc_vs_eco2(&root, readings, theme),
            ChartKind::AqiDistribution => {
                distribution::draw_aqi_distribution(&root, readings, theme)
            }
            ChartKind::SensorHeatmap => heatmap::draw_sensor_heatmap(&root, readings, theme),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
