//! Typed query methods for the dashboard's aggregates.
//!
//! All queries return typed structs from [`crate::models`] (or `bwq-core`
//! records) that can be serialized to JSON for the D3.js chart components.
//!
//! # "Latest" and "today"
//!
//! The latest row is the one with the highest `seq`, i.e. the last row after
//! the load-time sort. Its date is the reference date for every "today"
//! aggregate. Measurements are nullable; each aggregate only looks at the
//! non-null subset of its column, and SQLite's `MIN`/`MAX`/`AVG` yield NULL
//! (mapped to `None`) when that subset is empty.

use crate::models::{
    CurrentConditions, DayRange, DaySummary, ForecastPeak, ForecastStatus, ForecastSummary,
    LatestReading,
};
use crate::Database;
use bwq_core::forecast::SeriesPoint;
use bwq_core::metric::Metric;
use bwq_core::reading::SensorReading;
use bwq_core::risk::{classify, danger_threshold};
use bwq_core::timestamp::{DATE_FORMAT, TIMESTAMP_FORMAT};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

const READING_COLUMNS: &str =
    "timestamp, date, chlorophyll, temperature, dissolved_oxygen, turbidity";

/// Column of `readings` holding a metric. Only ever these fixed names are
/// spliced into SQL.
fn metric_column(metric: Metric) -> &'static str {
    match metric {
        Metric::Chlorophyll => "chlorophyll",
        Metric::Temperature => "temperature",
        Metric::DissolvedOxygen => "dissolved_oxygen",
        Metric::Turbidity => "turbidity",
    }
}

fn conversion_error(idx: usize, e: chrono::ParseError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn stored_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(|e| conversion_error(idx, e))
}

fn stored_optional_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| {
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(|e| conversion_error(idx, e))
    })
    .transpose()
}

fn stored_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| conversion_error(idx, e))
}

fn reading_from_row(row: &Row<'_>) -> rusqlite::Result<SensorReading> {
    Ok(SensorReading {
        timestamp: stored_optional_timestamp(row, 0)?,
        date: stored_date(row, 1)?,
        chlorophyll: row.get(2)?,
        temperature: row.get(3)?,
        dissolved_oxygen: row.get(4)?,
        turbidity: row.get(5)?,
    })
}

fn date_param(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl Database {
    // ───────────────────── Reading Queries ─────────────────────

    /// Time and date of the latest row, or `None` for an empty dataset.
    pub fn query_latest_reading(&self) -> anyhow::Result<Option<LatestReading>> {
        let conn = self.conn.borrow();
        let latest = conn
            .query_row(
                "SELECT timestamp, date FROM readings ORDER BY seq DESC LIMIT 1",
                [],
                |row| {
                    Ok(LatestReading {
                        timestamp: stored_optional_timestamp(row, 0)?,
                        date: stored_date(row, 1)?,
                    })
                },
            )
            .optional()?;
        Ok(latest)
    }

    /// The last non-null value of a metric's column, which may come from an
    /// earlier row than the latest one.
    pub fn query_last_valid(&self, metric: Metric) -> anyhow::Result<Option<f64>> {
        let column = metric_column(metric);
        let conn = self.conn.borrow();
        let value = conn
            .query_row(
                &format!(
                    "SELECT {col} FROM readings WHERE {col} IS NOT NULL ORDER BY seq DESC LIMIT 1",
                    col = column
                ),
                [],
                |row| row.get::<_, f64>(0),
            )
            .optional()?;
        log::debug!(
            "[BWQ] query: query_last_valid({}) = {:?}",
            metric.label(),
            value
        );
        Ok(value)
    }

    /// Min and max chlorophyll over the rows dated `date`.
    pub fn query_day_range(&self, date: NaiveDate) -> anyhow::Result<DayRange> {
        let conn = self.conn.borrow();
        let range = conn.query_row(
            "SELECT MIN(chlorophyll), MAX(chlorophyll) FROM readings WHERE date = ?1",
            params![date_param(date)],
            |row| {
                Ok(DayRange {
                    min: row.get(0)?,
                    max: row.get(1)?,
                })
            },
        )?;
        Ok(range)
    }

    /// Rows within 24 hours of the latest timestamp, inclusive.
    ///
    /// A dataset without timestamps has no time window, so every row is
    /// returned.
    pub fn query_last_24h(&self) -> anyhow::Result<Vec<SensorReading>> {
        let latest = match self.query_latest_reading()? {
            None => return Ok(Vec::new()),
            Some(latest) => latest,
        };
        let cutoff = match latest.timestamp {
            None => return self.query_readings(),
            Some(ts) => ts - Duration::hours(24),
        };

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM readings WHERE timestamp >= ?1 ORDER BY seq",
            READING_COLUMNS
        ))?;
        let rows = stmt
            .query_map(
                params![cutoff.format(TIMESTAMP_FORMAT).to_string()],
                reading_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BWQ] query: query_last_24h returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// The last `limit` rows dated within `days` days of the reference date,
    /// in load order.
    pub fn query_recent_readings(
        &self,
        days: u32,
        limit: usize,
    ) -> anyhow::Result<Vec<SensorReading>> {
        let reference = match self.query_latest_reading()? {
            None => return Ok(Vec::new()),
            Some(latest) => latest.date,
        };
        let since = reference - Duration::days(i64::from(days));

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {cols} FROM (
                SELECT seq, {cols} FROM readings
                WHERE date >= ?1
                ORDER BY seq DESC
                LIMIT ?2
             ) ORDER BY seq",
            cols = READING_COLUMNS
        ))?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![date_param(since), limit], reading_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BWQ] query: query_recent_readings returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Every historical row, in load order.
    pub fn query_readings(&self) -> anyhow::Result<Vec<SensorReading>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM readings ORDER BY seq",
            READING_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], reading_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BWQ] query: query_readings returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Latest values of all four metrics, the current tier and today's
    /// chlorophyll range.
    pub fn query_current_conditions(&self) -> anyhow::Result<CurrentConditions> {
        let latest = self.query_latest_reading()?;
        let chlorophyll = self.query_last_valid(Metric::Chlorophyll)?;
        let today_range = match latest {
            Some(l) => self.query_day_range(l.date)?,
            None => DayRange::default(),
        };
        Ok(CurrentConditions {
            latest_time: latest.and_then(|l| l.timestamp),
            reference_date: latest.map(|l| l.date),
            chlorophyll,
            temperature: self.query_last_valid(Metric::Temperature)?,
            dissolved_oxygen: self.query_last_valid(Metric::DissolvedOxygen)?,
            turbidity: self.query_last_valid(Metric::Turbidity)?,
            tier: classify(chlorophyll),
            today_range,
        })
    }

    // ───────────────────── Forecast Queries ─────────────────────

    /// The forecast points that carry a value, in load order.
    pub fn query_forecast_series(&self) -> anyhow::Result<Vec<SeriesPoint>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT timestamp, value FROM forecasts WHERE value IS NOT NULL ORDER BY seq",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(SeriesPoint {
                    timestamp: stored_timestamp(row, 0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BWQ] query: query_forecast_series returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// The highest forecast value. On ties the earliest point wins.
    pub fn query_forecast_peak(&self) -> anyhow::Result<Option<ForecastPeak>> {
        let conn = self.conn.borrow();
        let peak = conn
            .query_row(
                "SELECT timestamp, value FROM forecasts
                 WHERE value IS NOT NULL
                 ORDER BY value DESC, seq ASC
                 LIMIT 1",
                [],
                |row| {
                    let value: f64 = row.get(1)?;
                    Ok(ForecastPeak {
                        timestamp: stored_timestamp(row, 0)?,
                        value,
                        tier: classify(Some(value)),
                    })
                },
            )
            .optional()?;
        Ok(peak)
    }

    /// Mean, max and high-point count over the whole valid series.
    pub fn query_forecast_summary(&self) -> anyhow::Result<Option<ForecastSummary>> {
        let conn = self.conn.borrow();
        let summary = conn.query_row(
            "SELECT COUNT(value), AVG(value), MAX(value),
                    COALESCE(SUM(CASE WHEN value >= ?1 THEN 1 ELSE 0 END), 0)
             FROM forecasts
             WHERE value IS NOT NULL",
            params![danger_threshold()],
            |row| {
                let count: i64 = row.get(0)?;
                let mean: Option<f64> = row.get(1)?;
                let max: Option<f64> = row.get(2)?;
                let high_points: i64 = row.get(3)?;
                Ok(match (mean, max) {
                    (Some(mean), Some(max)) if count > 0 => Some(ForecastSummary {
                        mean,
                        max,
                        high_points: high_points as u32,
                        count: count as u32,
                    }),
                    _ => None,
                })
            },
        )?;
        Ok(summary)
    }

    /// Whether the forecast section has anything to show. A forecast with
    /// no rows at all counts as absent; rows without values do not.
    pub fn query_forecast_status(&self) -> anyhow::Result<ForecastStatus> {
        if !self.forecast_loaded.get() {
            return Ok(ForecastStatus::Absent);
        }
        let rows: i64 = self
            .conn
            .borrow()
            .query_row("SELECT COUNT(*) FROM forecasts", [], |row| row.get(0))?;
        if rows == 0 {
            return Ok(ForecastStatus::Absent);
        }
        Ok(match self.query_forecast_summary()? {
            Some(summary) => ForecastStatus::Available(summary),
            None => ForecastStatus::NoValidValues,
        })
    }

    /// Distinct dates that carry at least one forecast value, ascending.
    pub fn query_forecast_dates(&self) -> anyhow::Result<Vec<NaiveDate>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT date FROM forecasts WHERE value IS NOT NULL ORDER BY date",
        )?;
        let rows = stmt
            .query_map([], |row| stored_date(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[BWQ] query: query_forecast_dates returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Forecast statistics for one day; `None` when the day has no values.
    pub fn query_day_summary(&self, date: NaiveDate) -> anyhow::Result<Option<DaySummary>> {
        let conn = self.conn.borrow();
        let summary = conn.query_row(
            "SELECT COUNT(value), AVG(value), MIN(value), MAX(value)
             FROM forecasts
             WHERE date = ?1 AND value IS NOT NULL",
            params![date_param(date)],
            |row| {
                let count: i64 = row.get(0)?;
                let mean: Option<f64> = row.get(1)?;
                let min: Option<f64> = row.get(2)?;
                let max: Option<f64> = row.get(3)?;
                Ok(match (mean, min, max) {
                    (Some(mean), Some(min), Some(max)) if count > 0 => Some(DaySummary {
                        date,
                        mean,
                        min,
                        max,
                        count: count as u32,
                        tier: classify(Some(max)),
                    }),
                    _ => None,
                })
            },
        )?;
        Ok(summary)
    }
}
