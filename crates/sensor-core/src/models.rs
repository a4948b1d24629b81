use chrono::NaiveDateTime;
use std::fmt;

/// UBA air-quality category reported by the ENS160 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AqiCategory {
    Excellent,
    Good,
    Moderate,
    Poor,
    Unhealthy,
    /// Any code outside 1–5.
    Unknown,
}

impl AqiCategory {
    /// Map a raw AQI code to its category.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Excellent,
            2 => Self::Good,
            3 => Self::Moderate,
            4 => Self::Poor,
            5 => Self::Unhealthy,
            _ => Self::Unknown,
        }
    }

    /// Human-readable label, e.g. `"Excellent"`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::Unhealthy => "Unhealthy",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The seven raw fields of one sensor observation, before a timestamp is
/// attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// AQI UBA category code (1–5 when the sensor is healthy).
    pub aqi: u32,
    /// Total volatile organic compounds in ppb.
    pub tvoc: u32,
    /// Equivalent CO2 in ppm.
    pub eco2: u32,
    /// Raw resistance of hot plate 0.
    pub rs0: u64,
    /// Raw resistance of hot plate 1. The board always reports 1 here.
    pub rs1: u64,
    /// Raw resistance of hot plate 2.
    pub rs2: u64,
    /// Raw resistance of hot plate 3.
    pub rs3: u64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}

impl Measurement {
    /// Attach a timestamp, producing a [`Reading`].
    pub fn at(self, timestamp: NaiveDateTime) -> Reading {
        Reading {
            timestamp,
            aqi: self.aqi,
            tvoc: self.tvoc,
            eco2: self.eco2,
            rs0: self.rs0,
            rs1: self.rs1,
            rs2: self.rs2,
            rs3: self.rs3,
            humidity: self.humidity,
            temperature: self.temperature,
        }
    }
}

/// One assembled sensor observation with its synthetic timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Synthetic local time; readings are spaced one second apart.
    pub timestamp: NaiveDateTime,
    pub aqi: u32,
    pub tvoc: u32,
    pub eco2: u32,
    pub rs0: u64,
    pub rs1: u64,
    pub rs2: u64,
    pub rs3: u64,
    pub humidity: f64,
    pub temperature: f64,
}

impl Reading {
    /// Category of this reading's AQI code.
    pub fn aqi_category(&self) -> AqiCategory {
        AqiCategory::from_code(self.aqi)
    }
}

/// How the raw log bytes were turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8, no substitutions.
    Utf8,
    /// ISO-8859-1, one byte per character.
    Latin1,
    /// UTF-8 with invalid sequences replaced by U+FFFD.
    Utf8Lossy,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Utf8Lossy => "utf-8 (lossy)",
        };
        f.write_str(name)
    }
}

/// Which decoder to try after strict UTF-8 fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingFallback {
    /// Try Latin-1 before falling back to lossy UTF-8.
    #[default]
    Latin1,
    /// Go straight to lossy UTF-8.
    None,
}

impl std::str::FromStr for EncodingFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            "none" => Ok(Self::None),
            other => Err(format!("unknown encoding fallback: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_aqi_category_from_code() {
        assert_eq!(AqiCategory::from_code(1), AqiCategory::Excellent);
        assert_eq!(AqiCategory::from_code(2), AqiCategory::Good);
        assert_eq!(AqiCategory::from_code(3), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_code(4), AqiCategory::Poor);
        assert_eq!(AqiCategory::from_code(5), AqiCategory::Unhealthy);
        assert_eq!(AqiCategory::from_code(0), AqiCategory::Unknown);
        assert_eq!(AqiCategory::from_code(6), AqiCategory::Unknown);
    }

    #[test]
    fn test_aqi_category_display() {
        assert_eq!(AqiCategory::Moderate.to_string(), "Moderate");
        assert_eq!(AqiCategory::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_measurement_at_keeps_fields() {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let m = Measurement {
            aqi: 2,
            tvoc: 120,
            eco2: 540,
            rs0: 81_000,
            rs1: 1,
            rs2: 12_500,
            rs3: 240_000,
            humidity: 41.5,
            temperature: 22.25,
        };
        let reading = m.at(ts);
        assert_eq!(reading.timestamp, ts);
        assert_eq!(reading.tvoc, 120);
        assert_eq!(reading.rs3, 240_000);
        assert_eq!(reading.aqi_category(), AqiCategory::Good);
    }

    #[test]
    fn test_encoding_fallback_from_str() {
        assert_eq!("latin1".parse(), Ok(EncodingFallback::Latin1));
        assert_eq!("ISO-8859-1".parse(), Ok(EncodingFallback::Latin1));
        assert_eq!("none".parse(), Ok(EncodingFallback::None));
        assert!("cp1252".parse::<EncodingFallback>().is_err());
    }
}
