//! Descriptive statistics over an assembled dataset.

use std::collections::BTreeMap;
use std::fmt;

use sensor_core::formatting::{format_float, percentage};
use sensor_core::models::{AqiCategory, Reading};

// ── MetricSummary ─────────────────────────────────────────────────────────────

/// Mean, minimum and maximum of one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricSummary {
    /// Summarise `values`; `None` when empty.
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        (count > 0).then(|| Self {
            mean: sum / count as f64,
            min,
            max,
        })
    }
}

// ── CategoryShare ─────────────────────────────────────────────────────────────

/// Share of readings with one AQI code.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub code: u32,
    pub category: AqiCategory,
    pub count: usize,
    /// Percentage of all readings, rounded to two decimals.
    pub percentage: f64,
}

// ── DatasetStatistics ─────────────────────────────────────────────────────────

/// Aggregates printed after parsing.
///
/// Resistance channel 1 is deliberately absent: the board hard-wires it to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStatistics {
    pub count: usize,
    pub aqi: MetricSummary,
    pub tvoc: MetricSummary,
    pub eco2: MetricSummary,
    pub rs0_mean: f64,
    pub rs2_mean: f64,
    pub rs3_mean: f64,
    pub temperature: MetricSummary,
    pub humidity: MetricSummary,
    /// One entry per distinct AQI code, ascending.
    pub distribution: Vec<CategoryShare>,
}

impl DatasetStatistics {
    /// Compute statistics; `None` for an empty dataset.
    pub fn compute(readings: &[Reading]) -> Option<Self> {
        let summary = |f: fn(&Reading) -> f64| MetricSummary::from_values(readings.iter().map(f));

        let aqi = summary(|r| f64::from(r.aqi))?;
        let tvoc = summary(|r| f64::from(r.tvoc))?;
        let eco2 = summary(|r| f64::from(r.eco2))?;
        let rs0 = summary(|r| r.rs0 as f64)?;
        let rs2 = summary(|r| r.rs2 as f64)?;
        let rs3 = summary(|r| r.rs3 as f64)?;
        let temperature = summary(|r| r.temperature)?;
        let humidity = summary(|r| r.humidity)?;

        Some(Self {
            count: readings.len(),
            aqi,
            tvoc,
            eco2,
            rs0_mean: rs0.mean,
            rs2_mean: rs2.mean,
            rs3_mean: rs3.mean,
            temperature,
            humidity,
            distribution: aqi_distribution(readings),
        })
    }
}

/// Count readings per AQI code, ascending by code.
pub fn aqi_counts(readings: &[Reading]) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for r in readings {
        *counts.entry(r.aqi).or_insert(0) += 1;
    }
    counts
}

/// Percentage breakdown of AQI codes.
pub fn aqi_distribution(readings: &[Reading]) -> Vec<CategoryShare> {
    let total = readings.len() as f64;
    aqi_counts(readings)
        .into_iter()
        .map(|(code, count)| CategoryShare {
            code,
            category: AqiCategory::from_code(code),
            count,
            percentage: percentage(count as f64, total, 2),
        })
        .collect()
}

impl fmt::Display for DatasetStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Sensor Data Statistics =====")?;
        writeln!(f, "Total readings: {}", self.count)?;

        writeln!(f)?;
        writeln!(f, "--- Air Quality ---")?;
        writeln!(
            f,
            "Average AQI UBA: {:.2} (min: {:.0}, max: {:.0})",
            self.aqi.mean, self.aqi.min, self.aqi.max
        )?;
        writeln!(
            f,
            "Average TVOC: {:.2} ppb (min: {:.0}, max: {:.0})",
            self.tvoc.mean, self.tvoc.min, self.tvoc.max
        )?;
        writeln!(
            f,
            "Average ECO2: {:.2} ppm (min: {:.0}, max: {:.0})",
            self.eco2.mean, self.eco2.min, self.eco2.max
        )?;

        writeln!(f)?;
        writeln!(f, "--- Resistance Values ---")?;
        writeln!(f, "Average RS0: {:.2} Ω", self.rs0_mean)?;
        writeln!(f, "Average RS2: {:.2} Ω", self.rs2_mean)?;
        writeln!(f, "Average RS3: {:.2} Ω", self.rs3_mean)?;

        writeln!(f)?;
        writeln!(f, "--- Environmental Conditions ---")?;
        writeln!(
            f,
            "Average Temperature: {:.2}°C (min: {}, max: {})",
            self.temperature.mean,
            format_float(self.temperature.min),
            format_float(self.temperature.max)
        )?;
        writeln!(
            f,
            "Average Humidity: {:.2}% (min: {}, max: {})",
            self.humidity.mean,
            format_float(self.humidity.min),
            format_float(self.humidity.max)
        )?;

        writeln!(f)?;
        writeln!(f, "--- AQI Distribution ---")?;
        for share in &self.distribution {
            writeln!(
                f,
                "AQI {} ({}): {:.2}%",
                share.code, share.category, share.percentage
            )?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sensor_core::models::Measurement;

    fn reading(aqi: u32, tvoc: u32, eco2: u32, temperature: f64, humidity: f64) -> Reading {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Measurement {
            aqi,
            tvoc,
            eco2,
            rs0: 1000,
            rs1: 1,
            rs2: 2000,
            rs3: 4000,
            humidity,
            temperature,
        }
        .at(ts)
    }

    // ── MetricSummary ─────────────────────────────────────────────────────────

    #[test]
    fn test_metric_summary_basic() {
        let s = MetricSummary::from_values([1.0, 2.0, 6.0]).unwrap();
        assert!((s.mean - 3.0).abs() < 1e-9);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 6.0);
    }

    #[test]
    fn test_metric_summary_empty() {
        assert!(MetricSummary::from_values(std::iter::empty()).is_none());
    }

    // ── DatasetStatistics ─────────────────────────────────────────────────────

    #[test]
    fn test_compute_empty_is_none() {
        assert!(DatasetStatistics::compute(&[]).is_none());
    }

    #[test]
    fn test_compute_aggregates() {
        let readings = vec![
            reading(1, 100, 400, 20.0, 40.0),
            reading(2, 200, 600, 22.0, 50.0),
            reading(2, 300, 800, 24.0, 60.0),
        ];
        let stats = DatasetStatistics::compute(&readings).unwrap();

        assert_eq!(stats.count, 3);
        assert!((stats.tvoc.mean - 200.0).abs() < 1e-9);
        assert_eq!(stats.eco2.min, 400.0);
        assert_eq!(stats.eco2.max, 800.0);
        assert!((stats.temperature.mean - 22.0).abs() < 1e-9);
        assert_eq!(stats.humidity.max, 60.0);
        assert!((stats.rs3_mean - 4000.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_percentages_sorted() {
        let readings = vec![
            reading(3, 1, 1, 20.0, 40.0),
            reading(1, 1, 1, 20.0, 40.0),
            reading(3, 1, 1, 20.0, 40.0),
            reading(9, 1, 1, 20.0, 40.0),
        ];
        let dist = aqi_distribution(&readings);

        let codes: Vec<u32> = dist.iter().map(|s| s.code).collect();
        assert_eq!(codes, vec![1, 3, 9]);
        assert_eq!(dist[1].category, AqiCategory::Moderate);
        assert_eq!(dist[1].count, 2);
        assert!((dist[1].percentage - 50.0).abs() < 1e-9);
        assert_eq!(dist[2].category, AqiCategory::Unknown);
    }

    #[test]
    fn test_report_text() {
        let readings = vec![
            reading(1, 100, 400, 20.5, 40.0),
            reading(2, 200, 600, 21.5, 43.0),
        ];
        let report = DatasetStatistics::compute(&readings).unwrap().to_string();

        assert!(report.contains("Total readings: 2"));
        assert!(report.contains("Average TVOC: 150.00 ppb (min: 100, max: 200)"));
        assert!(report.contains("Average Temperature: 21.00°C (min: 20.5, max: 21.5)"));
        assert!(report.contains("Average Humidity: 41.50% (min: 40.0, max: 43.0)"));
        assert!(report.contains("AQI 1 (Excellent): 50.00%"));
        assert!(report.contains("AQI 2 (Good): 50.00%"));
    }

    #[test]
    fn test_report_never_mentions_rs1() {
        let readings = vec![reading(1, 100, 400, 20.5, 40.0)];
        let report = DatasetStatistics::compute(&readings).unwrap().to_string();

        assert!(report.contains("RS0"));
        assert!(!report.contains("RS1"));
    }
}
