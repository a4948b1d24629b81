//! Multi-line reading parser.
//!
//! The board prints each observation as three separate console lines:
//!
//! ```text
//! AQI UBA:2 TVOC:118 ECO2:612
//! RS0:80612 RS1:1 RS2:12870 RS3:240215
//! Humidity: 41.52%, Temperature: 22.31°C
//! ```
//!
//! Other output (boot banners, sensor status, noise from resets) can appear
//! between them. [`LineParser`] keeps the last line seen of each kind in a
//! [`PendingMatch`] and emits a [`Measurement`] when a humidity/temperature
//! line arrives while both other slots are filled.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use sensor_core::models::Measurement;
use tracing::debug;

// ── Patterns ──────────────────────────────────────────────────────────────────

fn air_quality_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"AQI UBA:(\d+)\s+TVOC:(\d+)\s+ECO2:(\d+)").expect("regex is valid")
    })
}

fn resistance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"RS0:(\d+)\s+RS1:(\d+)\s+RS2:(\d+)\s+RS3:(\d+)").expect("regex is valid")
    })
}

fn climate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Humidity: (\d+\.\d+)%, Temperature: (\d+\.\d+)").expect("regex is valid")
    })
}

/// The three fragment kinds that make up one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `AQI UBA:<n> TVOC:<n> ECO2:<n>`
    AirQuality,
    /// `RS0:<n> RS1:<n> RS2:<n> RS3:<n>`
    Resistance,
    /// `Humidity: <f>%, Temperature: <f>`
    Climate,
}

/// Classify a trimmed line. Patterns are tried in a fixed priority order and
/// may match anywhere in the line.
pub fn classify_line(line: &str) -> Option<LineKind> {
    if air_quality_re().is_match(line) {
        Some(LineKind::AirQuality)
    } else if resistance_re().is_match(line) {
        Some(LineKind::Resistance)
    } else if climate_re().is_match(line) {
        Some(LineKind::Climate)
    } else {
        None
    }
}

/// Extract `(aqi, tvoc, eco2)`.
pub fn parse_air_quality(line: &str) -> Option<(u32, u32, u32)> {
    let caps = air_quality_re().captures(line)?;
    Some((
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

/// Extract `[rs0, rs1, rs2, rs3]`.
pub fn parse_resistance(line: &str) -> Option<[u64; 4]> {
    let caps = resistance_re().captures(line)?;
    Some([
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
        caps[4].parse().ok()?,
    ])
}

/// Extract `(humidity, temperature)`.
pub fn parse_climate(line: &str) -> Option<(f64, f64)> {
    let caps = climate_re().captures(line)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

// ── PendingMatch ──────────────────────────────────────────────────────────────

/// Last-seen raw line of each kind since the previous emission.
///
/// Slots are overwritten on every new line of the same kind, so two air-quality
/// lines in a row keep only the second. Nothing checks that the three lines
/// belong to the same physical sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingMatch {
    air_quality: Option<String>,
    resistance: Option<String>,
    climate: Option<String>,
}

impl PendingMatch {
    /// Store `line` in the slot for `kind`. Returns `true` when an unconsumed
    /// line was replaced.
    pub fn store(&mut self, kind: LineKind, line: &str) -> bool {
        let slot = match kind {
            LineKind::AirQuality => &mut self.air_quality,
            LineKind::Resistance => &mut self.resistance,
            LineKind::Climate => &mut self.climate,
        };
        slot.replace(line.to_string()).is_some()
    }

    /// Both the air-quality and resistance slots are filled.
    pub fn has_prerequisites(&self) -> bool {
        self.air_quality.is_some() && self.resistance.is_some()
    }

    /// Whether `kind` currently holds a line.
    pub fn holds(&self, kind: LineKind) -> bool {
        match kind {
            LineKind::AirQuality => self.air_quality.is_some(),
            LineKind::Resistance => self.resistance.is_some(),
            LineKind::Climate => self.climate.is_some(),
        }
    }

    /// Drop the climate slot, keeping partial air-quality/resistance progress.
    pub fn discard_climate(&mut self) {
        self.climate = None;
    }

    /// Merge the three buffered lines into a [`Measurement`] and clear every
    /// slot.
    ///
    /// Returns `Ok(None)` and leaves the slots untouched when any slot is
    /// empty. When all three are present the slots are always cleared; a
    /// field that fails to parse (e.g. an integer overflow) yields `Err(())`.
    #[allow(clippy::result_unit_err)]
    pub fn take_complete(&mut self) -> Result<Option<Measurement>, ()> {
        if !(self.has_prerequisites() && self.climate.is_some()) {
            return Ok(None);
        }
        let (Some(aq), Some(rs), Some(ht)) = (
            self.air_quality.take(),
            self.resistance.take(),
            self.climate.take(),
        ) else {
            return Ok(None);
        };

        let (aqi, tvoc, eco2) = parse_air_quality(&aq).ok_or(())?;
        let [rs0, rs1, rs2, rs3] = parse_resistance(&rs).ok_or(())?;
        let (humidity, temperature) = parse_climate(&ht).ok_or(())?;

        Ok(Some(Measurement {
            aqi,
            tvoc,
            eco2,
            rs0,
            rs1,
            rs2,
            rs3,
            humidity,
            temperature,
        }))
    }
}

// ── ParseStats ────────────────────────────────────────────────────────────────

/// Counters collected while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines that were not empty after trimming.
    pub non_empty_lines: usize,
    pub air_quality_lines: usize,
    pub resistance_lines: usize,
    pub climate_lines: usize,
    /// Air-quality or resistance lines that replaced an unconsumed one.
    pub overwritten_lines: usize,
    /// Climate lines that arrived before both other slots were filled.
    pub dropped_climate_lines: usize,
    /// Complete triples whose fields could not be converted.
    pub unparsable_triples: usize,
    /// Measurements emitted.
    pub readings: usize,
}

impl fmt::Display for ParseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Matched {} complete data points out of {} non-empty lines.",
            self.readings, self.non_empty_lines
        )
    }
}

// ── LineParser ────────────────────────────────────────────────────────────────

/// Streaming parser; feed lines in file order.
#[derive(Debug, Default)]
pub struct LineParser {
    pending: PendingMatch,
    stats: ParseStats,
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one raw line, returning a measurement when it completes a
    /// triple.
    pub fn feed(&mut self, raw: &str) -> Option<Measurement> {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }
        self.stats.non_empty_lines += 1;

        let kind = classify_line(line)?;
        match kind {
            LineKind::AirQuality | LineKind::Resistance => {
                if kind == LineKind::AirQuality {
                    self.stats.air_quality_lines += 1;
                } else {
                    self.stats.resistance_lines += 1;
                }
                if self.pending.store(kind, line) {
                    self.stats.overwritten_lines += 1;
                    debug!("Pending {:?} line overwritten", kind);
                }
                None
            }
            LineKind::Climate => {
                self.stats.climate_lines += 1;
                self.pending.store(kind, line);

                if !self.pending.has_prerequisites() {
                    self.stats.dropped_climate_lines += 1;
                    self.pending.discard_climate();
                    return None;
                }

                match self.pending.take_complete() {
                    Ok(Some(measurement)) => {
                        self.stats.readings += 1;
                        Some(measurement)
                    }
                    Ok(None) => None,
                    Err(()) => {
                        self.stats.unparsable_triples += 1;
                        debug!("Discarded triple with unparsable fields ending at: {}", line);
                        None
                    }
                }
            }
        }
    }

    /// Current pending slots.
    pub fn pending(&self) -> &PendingMatch {
        &self.pending
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Consume the parser, returning the final counters.
    pub fn into_stats(self) -> ParseStats {
        self.stats
    }
}

/// Result of [`parse_lines`].
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    /// Measurements in the order their triple completed.
    pub measurements: Vec<Measurement>,
    pub stats: ParseStats,
}

/// Run a fresh [`LineParser`] over `lines`.
pub fn parse_lines<'a, I>(lines: I) -> ParseOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = LineParser::new();
    let measurements: Vec<Measurement> = lines
        .into_iter()
        .filter_map(|line| parser.feed(line))
        .collect();

    ParseOutcome {
        measurements,
        stats: parser.into_stats(),
    }
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// Number of leading lines echoed when nothing could be parsed.
pub const PREVIEW_LINES: usize = 5;

/// Number of leading lines probed for marker substrings.
pub const PROBE_LINES: usize = 6;

/// Marker substring checks for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineProbe {
    pub line: String,
    pub has_aqi: bool,
    pub has_rs0: bool,
    pub has_humidity: bool,
    pub has_temperature: bool,
}

impl LineProbe {
    fn new(line: &str) -> Self {
        Self {
            line: line.to_string(),
            has_aqi: line.contains("AQI"),
            has_rs0: line.contains("RS0"),
            has_humidity: line.contains("Humidity"),
            has_temperature: line.contains("Temperature"),
        }
    }
}

/// Dump shown when a log yields no readings at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    /// First few lines, trimmed.
    pub preview: Vec<String>,
    pub probes: Vec<LineProbe>,
}

impl ParseDiagnostics {
    /// Inspect the head of the log, blank lines included.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let head: Vec<&str> = lines
            .into_iter()
            .take(PREVIEW_LINES.max(PROBE_LINES))
            .map(str::trim)
            .collect();

        Self {
            preview: head
                .iter()
                .take(PREVIEW_LINES)
                .map(|l| l.to_string())
                .collect(),
            probes: head.iter().take(PROBE_LINES).map(|l| LineProbe::new(l)).collect(),
        }
    }
}

impl fmt::Display for ParseDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WARNING: No data could be extracted from the log file!")?;
        writeln!(f, "First few lines of the file:")?;
        for (i, line) in self.preview.iter().enumerate() {
            writeln!(f, "Line {}: {}", i + 1, line)?;
        }

        writeln!(f)?;
        writeln!(f, "Trying to debug pattern matching issue:")?;
        for (i, probe) in self.probes.iter().enumerate() {
            writeln!(f, "Testing line {}: {}", i + 1, probe.line)?;
            writeln!(f, "  Contains 'AQI': {}", probe.has_aqi)?;
            writeln!(f, "  Contains 'RS0': {}", probe.has_rs0)?;
            writeln!(f, "  Contains 'Humidity': {}", probe.has_humidity)?;
            writeln!(f, "  Contains 'Temperature': {}", probe.has_temperature)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const AQ: &str = "AQI UBA:2 TVOC:118 ECO2:612";
    const RS: &str = "RS0:80612 RS1:1 RS2:12870 RS3:240215";
    const HT: &str = "Humidity: 41.52%, Temperature: 22.31°C";

    // ── classify_line ─────────────────────────────────────────────────────────

    #[test]
    fn test_classify_line_kinds() {
        assert_eq!(classify_line(AQ), Some(LineKind::AirQuality));
        assert_eq!(classify_line(RS), Some(LineKind::Resistance));
        assert_eq!(classify_line(HT), Some(LineKind::Climate));
        assert_eq!(classify_line("Setup complete"), None);
    }

    #[test]
    fn test_classify_line_matches_anywhere() {
        assert_eq!(
            classify_line("[00:01] sensor> AQI UBA:1  TVOC:0\tECO2:400 ok"),
            Some(LineKind::AirQuality)
        );
    }

    #[test]
    fn test_classify_line_priority_order() {
        // A line carrying both fragments is classified as air quality.
        let both = format!("{AQ} {RS}");
        assert_eq!(classify_line(&both), Some(LineKind::AirQuality));
    }

    #[test]
    fn test_classify_line_rejects_integer_climate() {
        assert_eq!(classify_line("Humidity: 41%, Temperature: 22"), None);
    }

    // ── field parsers ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_fields() {
        assert_eq!(parse_air_quality(AQ), Some((2, 118, 612)));
        assert_eq!(parse_resistance(RS), Some([80_612, 1, 12_870, 240_215]));
        assert_eq!(parse_climate(HT), Some((41.52, 22.31)));
    }

    #[test]
    fn test_parse_air_quality_overflow() {
        assert_eq!(parse_air_quality("AQI UBA:99999999999 TVOC:1 ECO2:1"), None);
    }

    // ── PendingMatch ──────────────────────────────────────────────────────────

    #[test]
    fn test_pending_store_reports_overwrite() {
        let mut pending = PendingMatch::default();
        assert!(!pending.store(LineKind::AirQuality, AQ));
        assert!(pending.store(LineKind::AirQuality, AQ));
        assert!(pending.holds(LineKind::AirQuality));
        assert!(!pending.holds(LineKind::Resistance));
    }

    #[test]
    fn test_pending_take_complete_incomplete_keeps_slots() {
        let mut pending = PendingMatch::default();
        pending.store(LineKind::AirQuality, AQ);
        pending.store(LineKind::Climate, HT);

        assert_eq!(pending.take_complete(), Ok(None));
        assert!(pending.holds(LineKind::AirQuality));
        assert!(pending.holds(LineKind::Climate));
    }

    #[test]
    fn test_pending_take_complete_clears_all() {
        let mut pending = PendingMatch::default();
        pending.store(LineKind::AirQuality, AQ);
        pending.store(LineKind::Resistance, RS);
        pending.store(LineKind::Climate, HT);

        let m = pending.take_complete().unwrap().unwrap();
        assert_eq!(m.tvoc, 118);
        assert_eq!(pending, PendingMatch::default());
    }

    #[test]
    fn test_pending_take_complete_unparsable_still_clears() {
        let mut pending = PendingMatch::default();
        pending.store(LineKind::AirQuality, "AQI UBA:99999999999 TVOC:1 ECO2:1");
        pending.store(LineKind::Resistance, RS);
        pending.store(LineKind::Climate, HT);

        assert_eq!(pending.take_complete(), Err(()));
        assert_eq!(pending, PendingMatch::default());
    }

    // ── parse_lines ───────────────────────────────────────────────────────────

    #[test]
    fn test_single_triple_yields_one_measurement() {
        let outcome = parse_lines([AQ, RS, HT]);

        assert_eq!(outcome.measurements.len(), 1);
        let m = &outcome.measurements[0];
        assert_eq!(m.aqi, 2);
        assert_eq!(m.tvoc, 118);
        assert_eq!(m.eco2, 612);
        assert_eq!(m.rs0, 80_612);
        assert_eq!(m.rs1, 1);
        assert_eq!(m.rs2, 12_870);
        assert_eq!(m.rs3, 240_215);
        assert!((m.humidity - 41.52).abs() < 1e-9);
        assert!((m.temperature - 22.31).abs() < 1e-9);
        assert_eq!(outcome.stats.readings, 1);
        assert_eq!(outcome.stats.non_empty_lines, 3);
    }

    #[test]
    fn test_climate_before_prerequisites_is_dropped() {
        let outcome = parse_lines([HT, AQ, RS]);
        assert!(outcome.measurements.is_empty());
        assert_eq!(outcome.stats.dropped_climate_lines, 1);
    }

    #[test]
    fn test_climate_with_only_air_quality_keeps_partial_progress() {
        // The first climate line is dropped, the AQI slot survives and
        // completes with the later RS + climate lines.
        let outcome = parse_lines([AQ, HT, RS, "Humidity: 50.00%, Temperature: 20.00°C"]);

        assert_eq!(outcome.measurements.len(), 1);
        assert_eq!(outcome.measurements[0].tvoc, 118);
        assert!((outcome.measurements[0].humidity - 50.0).abs() < 1e-9);
        assert_eq!(outcome.stats.dropped_climate_lines, 1);
    }

    #[test]
    fn test_duplicate_lines_overwrite_pending_slot() {
        let outcome = parse_lines([
            "AQI UBA:1 TVOC:10 ECO2:400",
            "RS0:1000 RS1:1 RS2:2000 RS3:3000",
            "AQI UBA:3 TVOC:300 ECO2:900",
            "RS0:4000 RS1:1 RS2:5000 RS3:6000",
            HT,
        ]);

        assert_eq!(outcome.measurements.len(), 1);
        let m = &outcome.measurements[0];
        assert_eq!((m.aqi, m.tvoc, m.eco2), (3, 300, 900));
        assert_eq!((m.rs0, m.rs2, m.rs3), (4000, 5000, 6000));
        assert_eq!(outcome.stats.overwritten_lines, 2);
    }

    #[test]
    fn test_interleaved_noise_and_blank_lines() {
        let outcome = parse_lines([
            "ENS160 boot ok",
            "",
            AQ,
            "   ",
            "garbage \u{FFFD}\u{FFFD}",
            RS,
            "Setup complete",
            HT,
        ]);

        assert_eq!(outcome.measurements.len(), 1);
        assert_eq!(outcome.stats.non_empty_lines, 6);
    }

    #[test]
    fn test_consecutive_triples_reset_state() {
        let outcome = parse_lines([AQ, RS, HT, HT, AQ, RS, HT]);

        assert_eq!(outcome.measurements.len(), 2);
        // The bare climate line between the triples has nothing to pair with.
        assert_eq!(outcome.stats.dropped_climate_lines, 1);
    }

    #[test]
    fn test_order_of_aq_and_rs_does_not_matter() {
        let outcome = parse_lines([RS, AQ, HT]);
        assert_eq!(outcome.measurements.len(), 1);
    }

    #[test]
    fn test_no_matches_empty_outcome() {
        let outcome = parse_lines(["hello", "world"]);
        assert!(outcome.measurements.is_empty());
        assert_eq!(outcome.stats.non_empty_lines, 2);
        assert_eq!(
            outcome.stats.to_string(),
            "Matched 0 complete data points out of 2 non-empty lines."
        );
    }

    #[test]
    fn test_line_parser_feed_streaming() {
        let mut parser = LineParser::new();
        assert!(parser.feed(AQ).is_none());
        assert!(parser.pending().holds(LineKind::AirQuality));
        assert!(parser.feed(RS).is_none());
        assert!(parser.feed(HT).is_some());
        assert_eq!(parser.pending(), &PendingMatch::default());
        assert_eq!(parser.stats().readings, 1);
    }

    // ── ParseDiagnostics ──────────────────────────────────────────────────────

    #[test]
    fn test_diagnostics_limits_and_probes() {
        let lines = ["a", "AQI x", "b", "RS0", "Humidity", "Temperature", "never"];
        let diag = ParseDiagnostics::from_lines(lines);

        assert_eq!(diag.preview.len(), PREVIEW_LINES);
        assert_eq!(diag.probes.len(), PROBE_LINES);
        assert!(diag.probes[1].has_aqi);
        assert!(diag.probes[3].has_rs0);
        assert!(diag.probes[4].has_humidity);
        assert!(diag.probes[5].has_temperature);
        assert!(!diag.probes[0].has_aqi);
    }

    #[test]
    fn test_diagnostics_display() {
        let diag = ParseDiagnostics::from_lines(["  AQI broken  "]);
        let text = diag.to_string();

        assert!(text.contains("No data could be extracted"));
        assert!(text.contains("Line 1: AQI broken"));
        assert!(text.contains("Contains 'AQI': true"));
        assert!(text.contains("Contains 'RS0': false"));
    }
}
