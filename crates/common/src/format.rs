//! Display formatting for timestamps and byte counts

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

const SPANISH_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Rendered for anything [`parse_timestamp`] cannot read.
pub const INVALID_DATE: &str = "Invalid Date";

/// Parse the timestamp shapes the backends emit: RFC 3339, naive ISO-8601
/// (with or without fractional seconds) or a bare date.
///
/// Offsets are kept as wall-clock time in the offset the backend reported.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a timestamp as `"18 oct 2026, 14:05"` (es-ES, short month).
pub fn format_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => format!(
            "{} {} {}, {:02}:{:02}",
            dt.day(),
            SPANISH_MONTHS[dt.month0() as usize],
            dt.year(),
            dt.hour(),
            dt.minute()
        ),
        None => INVALID_DATE.to_string(),
    }
}

/// Date-only rendering, `"18/10/2026"`.
pub fn format_short_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => format!("{}/{}/{}", dt.day(), dt.month(), dt.year()),
        None => INVALID_DATE.to_string(),
    }
}

/// Scale a byte count to the largest of Bytes/KB/MB/GB that keeps the value
/// under 1024, shown with at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // 1023.999 KB would round up to "1024 KB"
    if round2(value) >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(&format!("{:.2}", value)), SIZE_UNITS[unit])
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn trim_decimals(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_610_612_736), "1.5 GB");
    }

    #[test]
    fn file_size_magnitude_stays_below_1024() {
        for bytes in [1u64, 1000, 1023, 1024, 1_048_575, 1_073_741_823, 123_456_789] {
            let rendered = format_file_size(bytes);
            let magnitude: f64 = rendered.split(' ').next().unwrap().parse().unwrap();
            assert!((0.0..1024.0).contains(&magnitude), "{} -> {}", bytes, rendered);
        }
    }

    #[test]
    fn file_size_caps_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-10-18T14:05:09.123456"), "18 oct 2026, 14:05");
        assert_eq!(format_date("2024-09-01T08:30:00+02:00"), "1 sept 2024, 08:30");
        assert_eq!(format_date("2025-01-07"), "7 ene 2025, 00:00");
        assert_eq!(format_date("yesterday"), INVALID_DATE);
    }

    #[test]
    fn test_format_short_date() {
        assert_eq!(format_short_date("2026-03-05T10:00:00"), "5/3/2026");
        assert_eq!(format_short_date(""), INVALID_DATE);
    }
}
