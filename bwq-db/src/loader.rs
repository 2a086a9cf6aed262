//! Loading typed datasets into the in-memory SQLite database.
//!
//! Parsing and validation already happened in `bwq-core`; here each record is
//! written as one row. A load replaces the table's previous contents, so a
//! render pass always sees exactly one snapshot of each dataset.

use crate::Database;
use bwq_core::forecast::ForecastPoint;
use bwq_core::reading::SensorReading;
use bwq_core::timestamp::{DATE_FORMAT, TIMESTAMP_FORMAT};
use rusqlite::params;

impl Database {
    /// Load historical sensor readings, in the given order.
    ///
    /// The slice index becomes the row's `seq`, which is what "latest"
    /// means for every reading query.
    pub fn load_readings(&self, readings: &[SensorReading]) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM readings", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO readings
                    (seq, timestamp, date, chlorophyll, temperature, dissolved_oxygen, turbidity)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for (seq, r) in readings.iter().enumerate() {
                let timestamp = r.timestamp.map(|ts| ts.format(TIMESTAMP_FORMAT).to_string());
                stmt.execute(params![
                    seq as i64,
                    timestamp,
                    r.date.format(DATE_FORMAT).to_string(),
                    r.chlorophyll,
                    r.temperature,
                    r.dissolved_oxygen,
                    r.turbidity,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("[BWQ] loader: Loaded {} readings", readings.len());
        Ok(())
    }

    /// Load forecast points, in the given order. Points without a value are
    /// kept so the per-day date list and the table stay aligned with the file.
    pub fn load_forecast(&self, points: &[ForecastPoint]) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let tx = conn.unchecked_transaction()?;
        tx.execute("DELETE FROM forecasts", [])?;
        let mut missing = 0u32;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO forecasts (seq, timestamp, date, value) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (seq, p) in points.iter().enumerate() {
                if p.forecast_chlorophyll.is_none() {
                    missing += 1;
                }
                stmt.execute(params![
                    seq as i64,
                    p.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    p.date.format(DATE_FORMAT).to_string(),
                    p.forecast_chlorophyll,
                ])?;
            }
        }
        tx.commit()?;
        self.forecast_loaded.set(true);
        log::info!(
            "[BWQ] loader: Loaded {} forecast points ({} without value)",
            points.len(),
            missing
        );
        Ok(())
    }
}
