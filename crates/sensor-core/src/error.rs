use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the sensor log tooling.
#[derive(Error, Debug)]
pub enum SensorError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An explicitly requested log file does not exist.
    #[error("Log file not found: {0}")]
    LogFileNotFound(PathBuf),

    /// Discovery found no `log.main.*.txt` file in any search directory.
    #[error("No log files found in {0}")]
    NoLogFiles(String),

    /// The output directory for charts could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single chart failed to render.
    #[error("Failed to render chart {chart}: {source}")]
    Render {
        chart: String,
        #[source]
        source: anyhow::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the sensor crates.
pub type Result<T> = std::result::Result<T, SensorError>;
