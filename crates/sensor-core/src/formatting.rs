use chrono::NaiveDateTime;

/// Format a timestamp as a wall-clock label, `HH:MM:SS`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sensor_core::formatting::format_clock;
///
/// let ts = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap().and_hms_opt(9, 5, 7).unwrap();
/// assert_eq!(format_clock(&ts), "09:05:07");
/// ```
pub fn format_clock(ts: &NaiveDateTime) -> String {
    ts.format("%H:%M:%S").to_string()
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use sensor_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// Render a float the way the statistics report shows raw min/max values:
/// shortest round-trip form, always with a fractional part.
///
/// # Examples
///
/// ```
/// use sensor_core::formatting::format_float;
///
/// assert_eq!(format_float(21.5), "21.5");
/// assert_eq!(format_float(40.0), "40.0");
/// ```
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_clock_pads_fields() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(1, 2, 3)
            .unwrap();
        assert_eq!(format_clock(&ts), "01:02:03");
    }

    #[test]
    fn test_format_clock_ignores_subseconds() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap();
        assert_eq!(format_clock(&ts), "23:59:59");
    }

    #[test]
    fn test_percentage_basic() {
        assert!((percentage(1.0, 3.0, 2) - 33.33).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(5.0, 0.0, 2), 0.0);
    }

    #[test]
    fn test_percentage_full() {
        assert_eq!(percentage(7.0, 7.0, 2), 100.0);
    }

    #[test]
    fn test_format_float_whole_number() {
        assert_eq!(format_float(22.0), "22.0");
    }

    #[test]
    fn test_format_float_fraction() {
        assert_eq!(format_float(45.12), "45.12");
    }
}
