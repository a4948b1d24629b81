use clap::Parser;
use std::path::PathBuf;

use crate::error::{Result, SensorError};
use crate::models::EncodingFallback;

/// Filename preferred over discovery when it exists in a search directory.
pub const DEFAULT_LOG_FILE: &str = "log.main.minicom-morningreadings-30mar-9am-430.txt";

/// Directory charts are written to when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "plots";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Parse an air-quality sensor log, print statistics and render charts
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sensor-viz",
    about = "Parse an air-quality sensor log, print statistics and render charts",
    version
)]
pub struct Settings {
    /// Log file to read (skips discovery)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Preferred log filename, checked in each search directory before discovery
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub default_log: String,

    /// Directories searched for `log.main.*.txt`
    #[arg(long = "search-dir", default_values = [".", ".."])]
    pub search_dirs: Vec<PathBuf>,

    /// Directory the charts are written to
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Decoder tried after strict UTF-8 fails
    #[arg(long, default_value = "latin1", value_parser = ["latin1", "none"])]
    pub encoding_fallback: String,

    /// Print statistics only, do not render charts
    #[arg(long)]
    pub no_charts: bool,

    /// Chart colour scheme
    #[arg(long, default_value = "light", value_parser = ["light", "dark"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// Typed view of `--encoding-fallback`.
    pub fn fallback(&self) -> Result<EncodingFallback> {
        self.encoding_fallback
            .parse()
            .map_err(SensorError::Config)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
