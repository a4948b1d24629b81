//! Byte-to-text decoding with a fallback chain.
//!
//! Serial captures regularly contain line noise from the board resetting, so
//! the log is not guaranteed to be valid UTF-8. Decoding never fails: strict
//! UTF-8 is tried first, then the configured fallback, then lossy UTF-8.

use std::path::Path;

use sensor_core::error::{Result, SensorError};
use sensor_core::models::{EncodingFallback, TextEncoding};
use tracing::{debug, warn};

/// Decoded log contents plus the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
}

impl DecodedText {
    /// Lines of the decoded text, see [`universal_lines`].
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        universal_lines(&self.text)
    }
}

/// Split on `\r\n`, lone `\r` or `\n`, without the terminators.
///
/// Serial consoles often end lines with a bare carriage return, which
/// [`str::lines`] would leave glued together.
pub fn universal_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(i) => {
                let line = &rest[..i];
                let terminator = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + terminator..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Decode `bytes`, walking the fallback chain until one strategy succeeds.
pub fn decode_bytes(bytes: &[u8], fallback: EncodingFallback) -> DecodedText {
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            return DecodedText {
                text: text.to_string(),
                encoding: TextEncoding::Utf8,
            }
        }
        Err(e) => debug!("Strict UTF-8 decoding failed at byte {}", e.valid_up_to()),
    }

    if fallback == EncodingFallback::Latin1 {
        warn!("Using latin-1 encoding to read the file.");
        return DecodedText {
            text: decode_latin1(bytes),
            encoding: TextEncoding::Latin1,
        };
    }

    warn!("Some characters in the log file couldn't be decoded properly.");
    DecodedText {
        text: String::from_utf8_lossy(bytes).into_owned(),
        encoding: TextEncoding::Utf8Lossy,
    }
}

/// Read `path` and decode it.
pub fn read_log_text(path: &Path, fallback: EncodingFallback) -> Result<DecodedText> {
    let bytes = std::fs::read(path).map_err(|source| SensorError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(decode_bytes(&bytes, fallback))
}

/// ISO-8859-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
