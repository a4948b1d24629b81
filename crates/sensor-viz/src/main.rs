mod bootstrap;
mod pipeline;

use anyhow::Result;
use sensor_charts::themes::ChartTheme;
use sensor_charts::ChartRenderer;
use sensor_core::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Sensor Viz v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Output: {}, Theme: {}, Encoding fallback: {}",
        settings.output_dir.display(),
        settings.theme,
        settings.encoding_fallback
    );

    let renderer = ChartRenderer::new(&settings.output_dir)
        .with_theme(ChartTheme::from_name(&settings.theme));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = pipeline::run(&settings, &mut out, |readings| {
        renderer.render_all(readings)
    })?;

    match outcome {
        pipeline::RunOutcome::NoLogFile => tracing::warn!("No log file to analyse"),
        pipeline::RunOutcome::NoData { source } => {
            tracing::warn!("No readings in {}", source.display())
        }
        pipeline::RunOutcome::Processed { source, readings } => {
            tracing::info!("Processed {} readings from {}", readings, source.display())
        }
    }
    Ok(())
}
