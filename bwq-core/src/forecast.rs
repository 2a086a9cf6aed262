use crate::error::{BwqError, Result};
use crate::metric::{FORECAST_COLUMN, TIMESTAMP_COLUMN};
use crate::reading::{finite, strip_bom};
use crate::timestamp::parse_timestamp;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// A single predicted chlorophyll value at a future point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    pub date: NaiveDate,
    /// Predicted chlorophyll in µg/L; `None` rows are left out of every aggregate.
    pub forecast_chlorophyll: Option<f64>,
}

/// A (timestamp, value) pair with a value present. This is the series the
/// chart and the frame builder work on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
struct RawForecastPoint {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(
        rename = "Forecast_Chlorophyll_Kalman",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    forecast_chlorophyll: Option<f64>,
}

/// Parse the forecast dataset.
///
/// Returns `Ok(None)` when the forecast column is absent. Points are stably
/// sorted ascending by timestamp, so their position in the returned vector
/// is the reset positional index.
pub fn parse_forecast_csv(csv_data: &str) -> Result<Option<Vec<ForecastPoint>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(strip_bom(csv_data).as_bytes());

    let headers = rdr.headers()?.clone();
    if !headers.iter().any(|h| h == FORECAST_COLUMN) {
        log::info!("[BWQ] loader: forecast column '{}' absent", FORECAST_COLUMN);
        return Ok(None);
    }
    if !headers.iter().any(|h| h == TIMESTAMP_COLUMN) {
        return Err(BwqError::MissingColumn(TIMESTAMP_COLUMN.to_string()));
    }

    let mut points = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.deserialize::<RawForecastPoint>() {
        let raw = result?;
        match parse_timestamp(&raw.timestamp) {
            Some(timestamp) => points.push(ForecastPoint {
                timestamp,
                date: timestamp.date(),
                forecast_chlorophyll: finite(raw.forecast_chlorophyll),
            }),
            None => skipped += 1,
        }
    }
    points.sort_by_key(|p| p.timestamp);
    if skipped > 0 {
        log::warn!(
            "[BWQ] loader: skipped {} forecast rows with unparseable time",
            skipped
        );
    }
    log::info!("[BWQ] loader: Loaded {} forecast points", points.len());
    Ok(Some(points))
}

/// Resolve the forecast for a render pass: a missing source, a missing
/// column, or a malformed file all mean "no forecast available".
pub fn forecast_from_source(source: Option<&str>) -> Option<Vec<ForecastPoint>> {
    let csv_data = source?;
    match parse_forecast_csv(csv_data) {
        Ok(points) => points,
        Err(e) => {
            log::warn!("[BWQ] loader: forecast unavailable: {}", e);
            None
        }
    }
}

/// The valid (non-null) part of a forecast, in time order.
pub fn valid_series(points: &[ForecastPoint]) -> Vec<SeriesPoint> {
    points
        .iter()
        .filter_map(|p| {
            p.forecast_chlorophyll.map(|value| SeriesPoint {
                timestamp: p.timestamp,
                value,
            })
        })
        .collect()
}
