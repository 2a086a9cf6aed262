//! Raw-data output: the recent-rows table and the full CSV export.

use crate::session::Session;
use bwq_core::export::export_history_csv;
use bwq_core::metric::Metric;
use bwq_utils::format::{format_reading_time, format_value};
use std::fmt::Write;
use std::path::Path;

/// Write the full historical dataset to `output`. Returns the bytes written.
pub fn run_export(session: &Session, output: &Path) -> anyhow::Result<usize> {
    let bytes = export_history_csv(&session.history.readings)?;
    std::fs::write(output, &bytes)?;
    log::info!(
        "[BWQ] export: {} rows to {}",
        session.history.readings.len(),
        output.display()
    );
    Ok(bytes.len())
}

/// The raw-data table: recent rows as aligned text columns.
pub fn recent_report(session: &Session, days: u32, limit: usize) -> anyhow::Result<String> {
    let rows = session.db.query_recent_readings(days, limit)?;
    let mut out = String::new();
    write!(out, "{:<16}", "Time")?;
    for metric in Metric::ALL {
        write!(out, " {:>24}", format!("{} ({})", metric.label(), metric.unit()))?;
    }
    writeln!(out)?;
    for r in &rows {
        write!(out, "{:<16}", format_reading_time(r))?;
        for metric in Metric::ALL {
            write!(out, " {:>24}", format_value(r.value(metric)))?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

pub fn run_recent(session: &Session, days: u32, limit: usize) -> anyhow::Result<()> {
    print!("{}", recent_report(session, days, limit)?);
    Ok(())
}
