use crate::error::{BwqError, Result};
use crate::metric::{Metric, DATE_COLUMN, TIMESTAMP_COLUMN};
use crate::reading::SensorReading;
use crate::timestamp::{DATE_FORMAT, TIMESTAMP_FORMAT};
use csv::WriterBuilder;

/// File name offered for the full raw-data download.
pub const EXPORT_FILE_NAME: &str = "brisbane_water_all.csv";

/// UTF-8 byte-order mark, so spreadsheet apps pick the right encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write the historical dataset as BOM-prefixed, comma-separated UTF-8.
/// Only the known columns are written; extra source columns are not kept.
///
/// The `Timestamp` column is only written when the rows carry timestamps, so
/// the output loads back through the same date/timestamp rule.
pub fn export_history_csv(readings: &[SensorReading]) -> Result<Vec<u8>> {
    let with_timestamp = readings.iter().any(|r| r.timestamp.is_some());

    let mut wtr = WriterBuilder::new().from_writer(UTF8_BOM.to_vec());

    let mut header: Vec<&str> = Vec::with_capacity(6);
    if with_timestamp {
        header.push(TIMESTAMP_COLUMN);
    }
    header.extend(Metric::ALL.iter().map(|m| m.column()));
    header.push(DATE_COLUMN);
    wtr.write_record(&header)?;

    for reading in readings {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        if with_timestamp {
            row.push(
                reading
                    .timestamp
                    .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_default(),
            );
        }
        row.extend(Metric::ALL.iter().map(|m| cell(reading.value(*m))));
        row.push(reading.date.format(DATE_FORMAT).to_string());
        wtr.write_record(&row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| BwqError::CsvParse(csv::Error::from(e.into_error())))?;
    log::info!(
        "[BWQ] export: wrote {} rows ({} bytes)",
        readings.len(),
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::parse_history_csv;

    const HISTORY_CSV: &str = "\
Timestamp,Chlorophyll_Kalman,Temperature_Kalman,Dissolved Oxygen_Kalman,Turbidity_Kalman
2024-11-03 00:00:00,2.9,24.4,6.9,11.5
2024-11-03 00:10:00,3.123456789,,6.8,12
2024-11-04 09:30:00,,24.6,,12.2
";

    #[test]
    fn export_starts_with_bom_and_header() {
        let readings = parse_history_csv(HISTORY_CSV).unwrap();
        let bytes = export_history_csv(&readings).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes).unwrap();
        let first_line = text.trim_start_matches('\u{feff}').lines().next().unwrap();
        assert_eq!(
            first_line,
            "Timestamp,Chlorophyll_Kalman,Temperature_Kalman,Dissolved Oxygen_Kalman,Turbidity_Kalman,date"
        );
    }

    #[test]
    fn export_writes_known_columns_only() {
        let readings = parse_history_csv(
            "Timestamp,Chlorophyll_Kalman,Station\n2024-11-03 00:00:00,2.5,Colmslie\n",
        )
        .unwrap();
        let text = String::from_utf8(export_history_csv(&readings).unwrap()).unwrap();
        assert!(!text.contains("Station"));
        assert!(!text.contains("Colmslie"));
        assert!(text.contains("2024-11-03 00:00:00,2.5,,,,2024-11-03"));
    }

    #[test]
    fn export_then_reload_reproduces_rows() {
        let readings = parse_history_csv(HISTORY_CSV).unwrap();
        let bytes = export_history_csv(&readings).unwrap();
        let reloaded = parse_history_csv(&String::from_utf8(bytes).unwrap()).unwrap();
        assert_eq!(reloaded, readings);
    }

    #[test]
    fn date_only_history_round_trips_without_timestamp_column() {
        let csv = "date,Chlorophyll_Kalman\n2024-11-03,4.5\n2024-11-04,\n";
        let readings = parse_history_csv(csv).unwrap();
        let text = String::from_utf8(export_history_csv(&readings).unwrap()).unwrap();
        assert!(!text.contains(TIMESTAMP_COLUMN));
        assert_eq!(parse_history_csv(&text).unwrap(), readings);
    }

    #[test]
    fn empty_history_exports_header_only() {
        let text = String::from_utf8(export_history_csv(&[]).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
