use crate::error::{BwqError, Result};
use crate::metric::{Metric, DATE_COLUMN, TIMESTAMP_COLUMN};
use crate::timestamp::{parse_date, parse_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single row of the historical sensor dataset, validated at load time.
///
/// All four measurements are Kalman-filtered upstream and any of them may be
/// missing for a given row, independently of the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    /// Absent when the source file only carries a `date` column.
    pub timestamp: Option<NaiveDateTime>,
    pub date: NaiveDate,
    /// Chlorophyll in µg/L
    pub chlorophyll: Option<f64>,
    /// Water temperature in °C
    pub temperature: Option<f64>,
    /// Dissolved oxygen in mg/L
    pub dissolved_oxygen: Option<f64>,
    /// Turbidity in NTU
    pub turbidity: Option<f64>,
}

impl SensorReading {
    /// The value of one measurement column.
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Chlorophyll => self.chlorophyll,
            Metric::Temperature => self.temperature,
            Metric::DissolvedOxygen => self.dissolved_oxygen,
            Metric::Turbidity => self.turbidity,
        }
    }
}

/// Row shape as it appears in the CSV. Missing measurement columns and
/// unparseable cells both deserialize to `None`.
#[derive(Debug, Deserialize)]
struct RawReading {
    #[serde(rename = "Timestamp", default)]
    timestamp: Option<String>,
    #[serde(rename = "date", default)]
    date: Option<String>,
    #[serde(rename = "Chlorophyll_Kalman", default, deserialize_with = "csv::invalid_option")]
    chlorophyll: Option<f64>,
    #[serde(rename = "Temperature_Kalman", default, deserialize_with = "csv::invalid_option")]
    temperature: Option<f64>,
    #[serde(
        rename = "Dissolved Oxygen_Kalman",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    dissolved_oxygen: Option<f64>,
    #[serde(rename = "Turbidity_Kalman", default, deserialize_with = "csv::invalid_option")]
    turbidity: Option<f64>,
}

/// NaN cells are nulls, not values.
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

impl RawReading {
    fn into_reading(self, has_timestamp: bool) -> Option<SensorReading> {
        let (timestamp, date) = if has_timestamp {
            let ts = parse_timestamp(self.timestamp.as_deref()?)?;
            (Some(ts), ts.date())
        } else {
            (None, parse_date(self.date.as_deref()?)?)
        };
        Some(SensorReading {
            timestamp,
            date,
            chlorophyll: finite(self.chlorophyll),
            temperature: finite(self.temperature),
            dissolved_oxygen: finite(self.dissolved_oxygen),
            turbidity: finite(self.turbidity),
        })
    }
}

/// Parse the historical dataset.
///
/// A `Timestamp` column wins over a `date` column; with timestamps the rows
/// are stably sorted by time, otherwise file order is kept. Rows whose time
/// cannot be parsed are skipped.
pub fn parse_history_csv(csv_data: &str) -> Result<Vec<SensorReading>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(strip_bom(csv_data).as_bytes());

    let headers = rdr.headers()?.clone();
    let has_timestamp = headers.iter().any(|h| h == TIMESTAMP_COLUMN);
    let has_date = headers.iter().any(|h| h == DATE_COLUMN);
    if !has_timestamp && !has_date {
        return Err(BwqError::MissingColumn(format!(
            "{} or {}",
            TIMESTAMP_COLUMN, DATE_COLUMN
        )));
    }
    for metric in Metric::ALL {
        if !headers.iter().any(|h| h == metric.column()) {
            log::warn!(
                "[BWQ] loader: column '{}' absent, treating as empty",
                metric.column()
            );
        }
    }

    let mut readings = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.deserialize::<RawReading>() {
        match result.ok().and_then(|raw| raw.into_reading(has_timestamp)) {
            Some(reading) => readings.push(reading),
            None => skipped += 1,
        }
    }
    if has_timestamp {
        readings.sort_by_key(|r| r.timestamp);
    }
    if skipped > 0 {
        log::warn!(
            "[BWQ] loader: skipped {} history rows with unparseable time",
            skipped
        );
    }
    log::info!("[BWQ] loader: Loaded {} history rows", readings.len());
    Ok(readings)
}

/// The historical dataset as seen by a render pass.
///
/// Loading never fails outward: a missing or unreadable source yields an
/// empty dataset with a user-facing `notice`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub readings: Vec<SensorReading>,
    pub notice: Option<String>,
}

impl History {
    /// Parse CSV text, converting any failure into a notice.
    pub fn from_csv(csv_data: &str) -> Self {
        match parse_history_csv(csv_data) {
            Ok(readings) => Self {
                readings,
                notice: None,
            },
            Err(e) => {
                log::error!("[BWQ] loader: history unusable: {}", e);
                Self::with_notice(e)
            }
        }
    }

    /// `None` means the source does not exist.
    pub fn from_source(source: Option<&str>, name: &str) -> Self {
        match source {
            Some(csv_data) => Self::from_csv(csv_data),
            None => Self::not_found(Path::new(name)),
        }
    }

    pub fn not_found(path: &Path) -> Self {
        log::error!("[BWQ] loader: history file not found: {}", path.display());
        Self::with_notice(BwqError::SourceNotFound(path.to_path_buf()))
    }

    pub fn with_notice(error: BwqError) -> Self {
        Self {
            readings: Vec::new(),
            notice: Some(error.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY_CSV: &str = "\
Timestamp,Chlorophyll_Kalman,Temperature_Kalman,Dissolved Oxygen_Kalman,Turbidity_Kalman,Extra
2024-11-03 00:10:00,3.1,24.5,6.8,12.0,x
2024-11-03 00:00:00,2.9,24.4,6.9,11.5,y
2024-11-03 00:20:00,,24.6,nan,12.2,z
";

    #[test]
    fn parses_and_sorts_by_timestamp() {
        let readings = parse_history_csv(HISTORY_CSV).unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].chlorophyll, Some(2.9));
        assert_eq!(readings[1].chlorophyll, Some(3.1));
        assert_eq!(
            readings[0].date,
            NaiveDate::from_ymd_opt(2024, 11, 3).unwrap()
        );
    }

    #[test]
    fn empty_and_nan_cells_are_null() {
        let readings = parse_history_csv(HISTORY_CSV).unwrap();
        let last = &readings[2];
        assert_eq!(last.chlorophyll, None);
        assert_eq!(last.dissolved_oxygen, None);
        assert_eq!(last.temperature, Some(24.6));
    }

    #[test]
    fn sort_is_stable_for_equal_timestamps() {
        let csv = "\
Timestamp,Chlorophyll_Kalman
2024-11-03 00:00:00,1.0
2024-11-03 00:00:00,2.0
";
        let readings = parse_history_csv(csv).unwrap();
        assert_eq!(readings[0].chlorophyll, Some(1.0));
        assert_eq!(readings[1].chlorophyll, Some(2.0));
    }

    #[test]
    fn missing_metric_columns_degrade_to_null() {
        let csv = "\
Timestamp,Chlorophyll_Kalman
2024-11-03 00:00:00,5.5
";
        let readings = parse_history_csv(csv).unwrap();
        assert_eq!(readings[0].chlorophyll, Some(5.5));
        assert_eq!(readings[0].turbidity, None);
        assert_eq!(readings[0].value(Metric::Temperature), None);
    }

    #[test]
    fn date_column_used_without_timestamps() {
        let csv = "\
date,Chlorophyll_Kalman
2024-11-04,4.0
2024-11-03,3.0
";
        let readings = parse_history_csv(csv).unwrap();
        assert_eq!(readings.len(), 2);
        assert!(readings.iter().all(|r| r.timestamp.is_none()));
        // File order is kept when there is nothing to sort on.
        assert_eq!(readings[0].chlorophyll, Some(4.0));
    }

    #[test]
    fn unparseable_rows_are_skipped() {
        let csv = "\
Timestamp,Chlorophyll_Kalman
garbage,1.0
2024-11-03 00:00:00,2.0
";
        let readings = parse_history_csv(csv).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].chlorophyll, Some(2.0));
    }

    #[test]
    fn missing_time_columns_is_an_error() {
        let csv = "Chlorophyll_Kalman\n1.0\n";
        assert!(matches!(
            parse_history_csv(csv),
            Err(BwqError::MissingColumn(_))
        ));
    }

    #[test]
    fn leading_bom_is_ignored() {
        let csv = "\u{feff}Timestamp,Chlorophyll_Kalman\n2024-11-03 00:00:00,2.0\n";
        let readings = parse_history_csv(csv).unwrap();
        assert_eq!(readings.len(), 1);
    }

    #[test]
    fn history_from_absent_source_carries_notice() {
        let history = History::from_source(None, "data/df_final.csv");
        assert!(history.is_empty());
        let notice = history.notice.unwrap();
        assert!(notice.contains("df_final.csv"), "notice was: {}", notice);
    }

    #[test]
    fn history_from_invalid_csv_carries_notice() {
        let history = History::from_csv("foo,bar\n1,2\n");
        assert!(history.is_empty());
        assert!(history.notice.is_some());
    }
}
