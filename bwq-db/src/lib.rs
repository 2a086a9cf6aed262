//! In-memory SQLite store for Brisbane River water-quality data.
//!
//! The typed records produced by `bwq-core` are loaded into an in-memory
//! SQLite database once per render pass, and every dashboard aggregate
//! (latest values, same-day range, forecast summaries, per-day summaries,
//! forecast peak) is derived from it with a typed query method.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite`
//! - Rows keep their load order in a `seq` column, so "latest" and "first
//!   occurrence" are well defined even when timestamps repeat
//! - Typed query methods returning serializable structs for the UI and CLI
//!
//! # Usage
//!
//! ```rust
//! use bwq_core::reading::History;
//! use bwq_db::Database;
//!
//! let history = History::from_csv(
//!     "Timestamp,Chlorophyll_Kalman\n2024-11-03 00:00:00,2.5\n2024-11-03 00:10:00,6.5\n",
//! );
//! let db = Database::new().unwrap();
//! db.load_readings(&history.readings).unwrap();
//!
//! let conditions = db.query_current_conditions().unwrap();
//! assert_eq!(conditions.chlorophyll, Some(6.5));
//! assert_eq!(conditions.today_range.min, Some(2.5));
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//! - `readings` - historical sensor rows, nullable measurements
//! - `forecasts` - forecast points, nullable predicted value

pub mod schema;
mod loader;
mod queries;
pub mod models;

use bwq_core::forecast::ForecastPoint;
use bwq_core::reading::SensorReading;
use rusqlite::Connection;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Days before the reference date shown in the raw-data table.
pub const RECENT_DAYS: u32 = 2;

/// Most rows shown in the raw-data table.
pub const RECENT_LIMIT: usize = 300;

/// In-memory SQLite database wrapping one render pass's datasets.
///
/// Cheaply cloneable (via `Rc`) and suitable for sharing across Dioxus
/// components in a single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
    /// Whether a forecast dataset was loaded at all, even an empty one.
    forecast_loaded: Rc<Cell<bool>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
            forecast_loaded: Rc::new(Cell::new(false)),
        })
    }

    /// Create a database holding both datasets. An absent forecast leaves
    /// the `forecasts` table empty.
    pub fn with_datasets(
        readings: &[SensorReading],
        forecast: Option<&[ForecastPoint]>,
    ) -> anyhow::Result<Self> {
        let db = Self::new()?;
        db.load_readings(readings)?;
        if let Some(points) = forecast {
            db.load_forecast(points)?;
        }
        Ok(db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        let history = bwq_core::reading::History::from_csv(
            "Timestamp,Chlorophyll_Kalman\n2024-11-03 00:00:00,2.5\n",
        );
        db.load_readings(&history.readings).unwrap();
        assert_eq!(
            db2.query_readings().unwrap().len(),
            1,
            "Clone should see same data via shared Rc"
        );
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_readings().unwrap().is_empty());
        assert!(db.query_forecast_series().unwrap().is_empty());
    }

    #[test]
    fn with_datasets_tolerates_absent_forecast() {
        let db = Database::with_datasets(&[], None).unwrap();
        assert!(db.query_forecast_summary().unwrap().is_none());
        assert_eq!(
            db.query_forecast_status().unwrap(),
            models::ForecastStatus::Absent
        );
    }
}
