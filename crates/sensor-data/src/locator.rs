//! Log file discovery.
//!
//! The sensor board's serial console is captured by minicom into files named
//! `log.main.<session>.txt`. A preferred filename wins when it exists;
//! otherwise every matching file in the search directories is collected and
//! the lexicographically-last path is used.

use std::path::{Path, PathBuf};

use sensor_core::error::{Result, SensorError};
use tracing::{debug, warn};

/// Filename prefix of captured console logs.
pub const LOG_PREFIX: &str = "log.main.";

/// Filename suffix of captured console logs.
pub const LOG_SUFFIX: &str = ".txt";

// ── Public API ────────────────────────────────────────────────────────────────

/// Returns `true` when `name` matches `log.main.*.txt`.
pub fn is_log_file_name(name: &str) -> bool {
    name.starts_with(LOG_PREFIX) && name.ends_with(LOG_SUFFIX)
}

/// Find all `log.main.*.txt` files directly inside `dir`.
pub fn find_log_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        debug!("Search directory does not exist: {}", dir.display());
        return Vec::new();
    }

    walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(is_log_file_name)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Pick the log file to analyse.
///
/// 1. `preferred` inside the first search directory that contains it.
/// 2. Otherwise the lexicographically-last `log.main.*.txt` across all
///    `search_dirs`, compared by the full path string.
pub fn locate_log_file(preferred: &str, search_dirs: &[PathBuf]) -> Result<PathBuf> {
    if let Some(found) = search_dirs
        .iter()
        .map(|dir| dir.join(preferred))
        .find(|candidate| candidate.is_file())
    {
        debug!("Using preferred log file {}", found.display());
        return Ok(found);
    }

    let mut candidates: Vec<PathBuf> = search_dirs
        .iter()
        .flat_map(|dir| find_log_files(dir))
        .collect();

    candidates.sort_by(|a, b| a.to_string_lossy().cmp(&b.to_string_lossy()));
    debug!("Found {} candidate log files", candidates.len());

    candidates.pop().ok_or_else(|| {
        let dirs = search_dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        warn!("No log files found in {}", dirs);
        SensorError::NoLogFiles(dirs)
    })
}

/// Resolve the input: an explicit path must exist, otherwise fall back to
/// discovery.
pub fn resolve_log_file(
    explicit: Option<&Path>,
    preferred: &str,
    search_dirs: &[PathBuf],
) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(SensorError::LogFileNotFound(path.to_path_buf())),
        None => locate_log_file(preferred, search_dirs),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
