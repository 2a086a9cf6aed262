//! Shared utility functions for BWQ crates.

/// Date utility functions
pub mod dates {
    use bwq_core::timestamp::DATE_FORMAT;
    use chrono::{NaiveDate, NaiveDateTime};

    /// Display format of a point in time, minute precision.
    pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// Format a timestamp as "YYYY-MM-DD HH:MM"
    pub fn format_time(ts: &NaiveDateTime) -> String {
        ts.format(DISPLAY_TIME_FORMAT).to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2024-11-03");
            assert_eq!(parse_date(&formatted).unwrap(), date);
            assert_eq!(parse_date(" 2024-11-03 ").unwrap(), date);
        }

        #[test]
        fn test_parse_rejects_other_layouts() {
            assert!(parse_date("03/11/2024").is_err());
            assert!(parse_date("2024-02-30").is_err());
        }

        #[test]
        fn test_format_time_drops_seconds() {
            let ts = NaiveDate::from_ymd_opt(2024, 11, 3)
                .unwrap()
                .and_hms_opt(18, 5, 59)
                .unwrap();
            assert_eq!(format_time(&ts), "2024-11-03 18:05");
        }
    }
}

/// Null-tolerant display formatting
pub mod format {
    use crate::dates::{format_date, format_time};
    use bwq_core::metric::Metric;
    use bwq_core::reading::SensorReading;
    use chrono::NaiveDateTime;

    /// Shown in place of a missing number.
    pub const PLACEHOLDER: &str = "–";

    pub const NO_DATA: &str = "No data";

    pub const NOT_AVAILABLE: &str = "Not available";

    /// One decimal, or the placeholder.
    pub fn format_value(value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => format!("{:.1}", v),
            _ => PLACEHOLDER.to_string(),
        }
    }

    /// One decimal followed by the unit, or the bare placeholder.
    pub fn format_with_unit(value: Option<f64>, unit: &str) -> String {
        match value {
            Some(v) if v.is_finite() => format!("{:.1} {}", v, unit),
            _ => PLACEHOLDER.to_string(),
        }
    }

    pub fn format_metric(metric: Metric, value: Option<f64>) -> String {
        format_with_unit(value, metric.unit())
    }

    /// `min ~ max µg/L`, or "No data" when the day has no values.
    pub fn format_range(min: Option<f64>, max: Option<f64>) -> String {
        match (min, max) {
            (Some(lo), Some(hi)) => format!(
                "{:.1} ~ {:.1} {}",
                lo,
                hi,
                Metric::Chlorophyll.unit()
            ),
            _ => NO_DATA.to_string(),
        }
    }

    pub fn format_latest_time(ts: Option<NaiveDateTime>) -> String {
        ts.map(|t| format_time(&t))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// The time column of the raw-data table: the timestamp when present,
    /// otherwise the date.
    pub fn format_reading_time(reading: &SensorReading) -> String {
        match reading.timestamp {
            Some(ts) => format_time(&ts),
            None => format_date(&reading.date),
        }
    }

}
