//! Main analysis pipeline.
//!
//! Decodes the log, runs the line parser, stamps readings and returns an
//! [`AnalysisResult`] ready for the statistics report and chart renderer.

use std::path::{Path, PathBuf};

use sensor_core::error::Result;
use sensor_core::models::{EncodingFallback, Reading, TextEncoding};
use tracing::{debug, info};

use crate::assembler::assemble;
use crate::decoder::read_log_text;
use crate::parser::{parse_lines, ParseDiagnostics, ParseStats};
use crate::statistics::DatasetStatistics;

// ── Public types ──────────────────────────────────────────────────────────────

/// The complete output of [`analyze_log`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Log file that was analysed.
    pub source: PathBuf,
    /// Decoder that produced the text.
    pub encoding: TextEncoding,
    /// Readings in parse order, one second apart.
    pub readings: Vec<Reading>,
    pub parse_stats: ParseStats,
    /// Populated only when no reading could be assembled.
    pub diagnostics: Option<ParseDiagnostics>,
    /// Wall-clock seconds spent reading and decoding the file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent parsing.
    pub parse_time_seconds: f64,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Statistics over [`AnalysisResult::readings`]; `None` when empty.
    pub fn statistics(&self) -> Option<DatasetStatistics> {
        DatasetStatistics::compute(&self.readings)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline over `path`.
///
/// 1. Read and decode the file through the encoding fallback chain.
/// 2. Parse lines into measurements.
/// 3. Attach synthetic timestamps.
/// 4. Build a diagnostic dump when nothing matched.
pub fn analyze_log(path: &Path, fallback: EncodingFallback) -> Result<AnalysisResult> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let decoded = read_log_text(path, fallback)?;
    let load_time = load_start.elapsed().as_secs_f64();
    debug!("Decoded {} as {}", path.display(), decoded.encoding);

    // ── Step 2: Parse ─────────────────────────────────────────────────────────
    let parse_start = std::time::Instant::now();
    let outcome = parse_lines(decoded.lines());
    let parse_time = parse_start.elapsed().as_secs_f64();

    info!("{}", outcome.stats);
    debug!(
        "Line kinds: {} air quality, {} resistance, {} climate ({} dropped, {} overwritten)",
        outcome.stats.air_quality_lines,
        outcome.stats.resistance_lines,
        outcome.stats.climate_lines,
        outcome.stats.dropped_climate_lines,
        outcome.stats.overwritten_lines,
    );

    // ── Step 3: Timestamps ────────────────────────────────────────────────────
    let readings = assemble(outcome.measurements);

    // ── Step 4: Diagnostics ───────────────────────────────────────────────────
    let diagnostics = readings
        .is_empty()
        .then(|| ParseDiagnostics::from_lines(decoded.lines()));

    Ok(AnalysisResult {
        source: path.to_path_buf(),
        encoding: decoded.encoding,
        readings,
        parse_stats: outcome.stats,
        diagnostics,
        load_time_seconds: load_time,
        parse_time_seconds: parse_time,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sensor_core::error::SensorError;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_analyze_log_carriage_return_only_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.main.minicom.txt");
        let text = [
            "AQI UBA:1 TVOC:20 ECO2:410",
            "RS0:90000 RS1:1 RS2:13000 RS3:250000",
            "Humidity: 40.00%, Temperature: 21.50°C",
            "AQI UBA:3 TVOC:300 ECO2:900",
            "RS0:70000 RS1:1 RS2:11000 RS3:200000",
            "Humidity: 42.50%, Temperature: 22.00°C",
        ]
        .join("\r");
        std::fs::write(&path, text).unwrap();

        let result = analyze_log(&path, EncodingFallback::Latin1).unwrap();

        assert_eq!(result.parse_stats.non_empty_lines, 6);
        assert_eq!(result.readings.len(), 2);
        assert_eq!(result.readings[1].aqi, 3);
        assert!((result.readings[1].humidity - 42.5).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_log_basic_pipeline() {
        let dir = TempDir::new().unwrap();
        let path = write_log(
            dir.path(),
            "log.main.a.txt",
            &[
                "Setup complete",
                "AQI UBA:1 TVOC:20 ECO2:410",
                "RS0:90000 RS1:1 RS2:13000 RS3:250000",
                "Humidity: 40.00%, Temperature: 21.50°C",
                "AQI UBA:2 TVOC:80 ECO2:520",
                "RS0:85000 RS1:1 RS2:12800 RS3:245000",
                "Humidity: 41.00%, Temperature: 21.60°C",
            ],
        );

        let result = analyze_log(&path, EncodingFallback::Latin1).unwrap();

        assert_eq!(result.readings.len(), 2);
        assert_eq!(result.encoding, TextEncoding::Utf8);
        assert_eq!(result.parse_stats.non_empty_lines, 7);
        assert!(result.diagnostics.is_none());
        assert_eq!(
            result.readings[1].timestamp - result.readings[0].timestamp,
            Duration::seconds(1)
        );
        assert_eq!(result.statistics().unwrap().count, 2);
    }

    #[test]
    fn test_analyze_log_no_matches_builds_diagnostics() {
        let dir = TempDir::new().unwrap();
        let path = write_log(dir.path(), "log.main.a.txt", &["boot", "AQI sensor offline"]);

        let result = analyze_log(&path, EncodingFallback::Latin1).unwrap();

        assert!(result.is_empty());
        assert!(result.statistics().is_none());
        let diag = result.diagnostics.unwrap();
        assert_eq!(diag.preview, vec!["boot", "AQI sensor offline"]);
        assert!(diag.probes[1].has_aqi);
    }

    #[test]
    fn test_analyze_log_latin1_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.main.b.txt");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"AQI UBA:3 TVOC:300 ECO2:900\n");
        bytes.extend_from_slice(b"RS0:70000 RS1:1 RS2:11000 RS3:230000\n");
        bytes.extend_from_slice(b"Humidity: 55.10%, Temperature: 23.40\xB0C\n");
        std::fs::write(&path, bytes).unwrap();

        let result = analyze_log(&path, EncodingFallback::Latin1).unwrap();

        assert_eq!(result.encoding, TextEncoding::Latin1);
        assert_eq!(result.readings.len(), 1);
        assert!((result.readings[0].temperature - 23.4).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_log_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = analyze_log(&dir.path().join("none.txt"), EncodingFallback::Latin1).unwrap_err();
        assert!(matches!(err, SensorError::FileRead { .. }));
    }
}
