//! Current conditions and the forecast outlook as plain text.

use crate::session::Session;
use bwq_core::metric::Metric;
use bwq_core::risk::legend;
use bwq_db::models::ForecastStatus;
use bwq_utils::dates::format_time;
use bwq_utils::format::{format_latest_time, format_metric, format_range, format_value};
use std::fmt::Write;

/// "0–4 Good · 4–8 Caution · 8+ Danger"
fn legend_line() -> String {
    legend()
        .iter()
        .map(|e| format!("{} {}", e.range_text(), e.tier.label()))
        .collect::<Vec<_>>()
        .join(" · ")
}

/// Reading count and chlorophyll span over the day before the latest reading.
fn last_24h_line(session: &Session) -> anyhow::Result<String> {
    let rows = session.db.query_last_24h()?;
    let values = rows.iter().filter_map(|r| r.chlorophyll);
    let min = values.clone().reduce(f64::min);
    let max = values.reduce(f64::max);
    Ok(format!(
        "{} readings, chlorophyll {}",
        rows.len(),
        format_range(min, max)
    ))
}

pub fn status_report(session: &Session) -> anyhow::Result<String> {
    let db = &session.db;
    let c = db.query_current_conditions()?;
    let mut out = String::new();

    if let Some(notice) = &session.history.notice {
        writeln!(out, "⚠ {}", notice)?;
    }
    writeln!(out, "Brisbane River · Colmslie")?;
    writeln!(out, "Last update:      {}", format_latest_time(c.latest_time))?;
    writeln!(
        out,
        "Chlorophyll:      {}  {} {}",
        format_metric(Metric::Chlorophyll, c.chlorophyll),
        c.tier.glyph(),
        c.tier.label()
    )?;
    writeln!(out, "                  {}", c.tier.message())?;
    writeln!(
        out,
        "Today's range:    {}",
        format_range(c.today_range.min, c.today_range.max)
    )?;
    writeln!(out, "Last 24h:         {}", last_24h_line(session)?)?;
    writeln!(
        out,
        "Temperature:      {}",
        format_metric(Metric::Temperature, c.temperature)
    )?;
    writeln!(
        out,
        "Turbidity:        {}",
        format_metric(Metric::Turbidity, c.turbidity)
    )?;
    writeln!(
        out,
        "Dissolved oxygen: {}",
        format_metric(Metric::DissolvedOxygen, c.dissolved_oxygen)
    )?;
    writeln!(out, "Thresholds (µg/L): {}", legend_line())?;
    writeln!(out)?;
    writeln!(out, "Activity: {}", c.tier.activity())?;
    writeln!(out)?;

    match db.query_forecast_status()? {
        ForecastStatus::Absent => {
            writeln!(out, "Forecast: not available, the weekly outlook cannot be shown.")?;
        }
        ForecastStatus::NoValidValues => {
            writeln!(out, "Forecast: the forecast holds no valid values.")?;
        }
        ForecastStatus::Available(summary) => {
            writeln!(
                out,
                "Forecast: mean {} · max {} · {} points in Danger (≥{})",
                format_value(Some(summary.mean)),
                format_value(Some(summary.max)),
                summary.high_points,
                bwq_core::risk::danger_threshold()
            )?;
            if let Some(peak) = db.query_forecast_peak()? {
                writeln!(
                    out,
                    "Peak:     {} at {} ({} {})",
                    format_metric(Metric::Chlorophyll, Some(peak.value)),
                    format_time(&peak.timestamp),
                    peak.tier.glyph(),
                    peak.tier.label()
                )?;
            }
        }
    }
    Ok(out)
}

pub fn run_status(session: &Session) -> anyhow::Result<()> {
    print!("{}", status_report(session)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{empty_session, sample_session};

    #[test]
    fn report_shows_current_conditions() {
        let (_dir, session) = sample_session();
        let report = status_report(&session).unwrap();
        assert!(report.contains("Last update:      2024-11-03 18:00"));
        assert!(report.contains("5.5 µg/L  🟡 Caution"));
        assert!(report.contains("Today's range:    4.2 ~ 6.8 µg/L"));
        assert!(report.contains("Last 24h:         4 readings, chlorophyll 4.2 ~ 6.8 µg/L"));
        assert!(report.contains("Temperature:      25.1 °C"));
        assert!(report.contains("Turbidity:        12.0 NTU"));
        assert!(report.contains("Dissolved oxygen: 6.4 mg/L"));
        assert!(report.contains("0–4 Good · 4–8 Caution · 8+ Danger"));
    }

    #[test]
    fn report_shows_forecast_outlook() {
        let (_dir, session) = sample_session();
        let report = status_report(&session).unwrap();
        assert!(report.contains("Forecast: mean 6.5 · max 9.0 · 2 points in Danger (≥8)"));
        assert!(report.contains("9.0 µg/L at 2024-11-04 06:00 (🔴 Danger)"));
    }

    #[test]
    fn missing_files_degrade_to_placeholders() {
        let (_dir, session) = empty_session();
        let report = status_report(&session).unwrap();
        assert!(report.contains("Data file not found"));
        assert!(report.contains("Last update:      Not available"));
        assert!(report.contains("Chlorophyll:      –  ⚪ Unknown"));
        assert!(report.contains("Today's range:    No data"));
        assert!(report.contains("Last 24h:         0 readings, chlorophyll No data"));
        assert!(report.contains("Forecast: not available"));
    }
}
