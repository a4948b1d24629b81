//! End-to-end run: locate, analyse, report, render.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use sensor_charts::RenderReport;
use sensor_core::error::SensorError;
use sensor_core::models::Reading;
use sensor_core::settings::Settings;
use sensor_data::analysis::analyze_log;
use sensor_data::locator::resolve_log_file;
use tracing::{info, warn};

/// How a run ended.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// No log file could be found; nothing was written.
    NoLogFile,
    /// The log was read but produced no readings; charts were skipped.
    NoData { source: PathBuf },
    /// Readings were reported (and rendered unless `--no-charts`).
    Processed { source: PathBuf, readings: usize },
}

/// Run the whole pipeline, writing the report to `out`.
///
/// `render` is called at most once, and only with a non-empty dataset.
pub fn run<W, F>(settings: &Settings, out: &mut W, render: F) -> Result<RunOutcome>
where
    W: Write,
    F: FnOnce(&[Reading]) -> sensor_core::error::Result<RenderReport>,
{
    let fallback = settings.fallback()?;

    let log_file = match resolve_log_file(
        settings.input.as_deref(),
        &settings.default_log,
        &settings.search_dirs,
    ) {
        Ok(path) => path,
        Err(e @ (SensorError::NoLogFiles(_) | SensorError::LogFileNotFound(_))) => {
            writeln!(out, "{e}")?;
            return Ok(RunOutcome::NoLogFile);
        }
        Err(e) => return Err(e.into()),
    };
    writeln!(out, "Using log file: {}", log_file.display())?;

    let analysis = analyze_log(&log_file, fallback)?;
    writeln!(out, "{}", analysis.parse_stats)?;

    let Some(stats) = analysis.statistics() else {
        if let Some(diagnostics) = &analysis.diagnostics {
            write!(out, "{diagnostics}")?;
        }
        writeln!(out, "No data to process. Exiting.")?;
        return Ok(RunOutcome::NoData { source: log_file });
    };

    writeln!(out)?;
    write!(out, "{stats}")?;

    let mut charts_written = false;
    if settings.no_charts {
        info!("Chart rendering disabled");
    } else {
        let report = render(&analysis.readings)?;
        for (kind, error) in &report.failed {
            warn!(chart = %kind, "Skipped: {error}");
        }
        charts_written = !report.written.is_empty();
        if charts_written {
            writeln!(
                out,
                "Plots have been saved to the '{}' directory.",
                settings.output_dir.display()
            )?;
        }
    }

    writeln!(
        out,
        "Successfully processed {} readings from {}.",
        analysis.readings.len(),
        log_file.display()
    )?;
    if charts_written {
        writeln!(
            out,
            "Check the '{}' directory for visualization results.",
            settings.output_dir.display()
        )?;
    }

    Ok(RunOutcome::Processed {
        source: log_file,
        readings: analysis.readings.len(),
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
