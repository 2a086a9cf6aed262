//! Forecast dates, per-day summaries and animation frames.

use crate::session::Session;
use bwq_data::chart::AnimationPayload;
use bwq_db::models::ForecastStatus;
use bwq_utils::dates::{format_date, parse_date};
use bwq_utils::format::format_value;
use chrono::NaiveDate;
use std::fmt::Write;
use std::num::NonZeroUsize;

const NO_FORECAST: &str = "No forecast available.";
const NO_DATA_FOR_DATE: &str = "No forecast data for the selected date.";

pub fn dates_report(session: &Session) -> anyhow::Result<String> {
    let db = &session.db;
    if db.query_forecast_status()? == ForecastStatus::Absent {
        return Ok(format!("{}\n", NO_FORECAST));
    }
    let mut out = String::new();
    for date in db.query_forecast_dates()? {
        writeln!(out, "{}", format_date(&date))?;
    }
    Ok(out)
}

pub fn day_report(session: &Session, date: NaiveDate) -> anyhow::Result<String> {
    let db = &session.db;
    if db.query_forecast_status()? == ForecastStatus::Absent {
        return Ok(format!("{}\n", NO_FORECAST));
    }
    let summary = match db.query_day_summary(date)? {
        Some(summary) => summary,
        None => return Ok(format!("{}: {}\n", format_date(&date), NO_DATA_FOR_DATE)),
    };
    Ok(format!(
        "{} forecast: mean {} · min {} · max {} µg/L\n{} {} levels may occur on this day.\n",
        format_date(&summary.date),
        format_value(Some(summary.mean)),
        format_value(Some(summary.min)),
        format_value(Some(summary.max)),
        summary.tier.glyph(),
        summary.tier.label()
    ))
}

pub fn frames_json(session: &Session, step: NonZeroUsize) -> anyhow::Result<String> {
    let series = session.db.query_forecast_series()?;
    let payload = AnimationPayload::new(&series, step);
    Ok(serde_json::to_string_pretty(&payload)?)
}

pub fn run_dates(session: &Session) -> anyhow::Result<()> {
    print!("{}", dates_report(session)?);
    Ok(())
}

pub fn run_day(session: &Session, date: &str) -> anyhow::Result<()> {
    let date = parse_date(date)?;
    print!("{}", day_report(session, date)?);
    Ok(())
}

pub fn run_frames(session: &Session, step: NonZeroUsize) -> anyhow::Result<()> {
    println!("{}", frames_json(session, step)?);
    Ok(())
}
