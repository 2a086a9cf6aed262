//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// - `readings` - one row per historical sensor reading. `seq` is the
///   position after the load-time sort; measurements are NULL when missing.
///   `timestamp` is NULL for date-only datasets.
/// - `forecasts` - one row per forecast point; `value` is NULL when the
///   upstream model produced nothing for that time step.
///
/// Timestamps are stored as `YYYY-MM-DD HH:MM:SS` text and dates as
/// `YYYY-MM-DD`, so text comparison orders them chronologically.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS readings (
        seq INTEGER PRIMARY KEY,
        timestamp TEXT,
        date TEXT NOT NULL,
        chlorophyll REAL,
        temperature REAL,
        dissolved_oxygen REAL,
        turbidity REAL
    );
    CREATE INDEX IF NOT EXISTS idx_readings_date ON readings(date);
    CREATE INDEX IF NOT EXISTS idx_readings_timestamp ON readings(timestamp);

    CREATE TABLE IF NOT EXISTS forecasts (
        seq INTEGER PRIMARY KEY,
        timestamp TEXT NOT NULL,
        date TEXT NOT NULL,
        value REAL
    );
    CREATE INDEX IF NOT EXISTS idx_forecasts_date ON forecasts(date);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for table in &["readings", "forecasts"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[test]
    fn schema_creates_indexes() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for idx in &[
            "idx_readings_date",
            "idx_readings_timestamp",
            "idx_forecasts_date",
        ] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?1",
                    [idx],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "Index '{}' should exist", idx);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
