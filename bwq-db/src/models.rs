//! Query result model structs for readings and forecasts.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend, or printed by the CLI.

use bwq_core::risk::RiskTier;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Lowest and highest chlorophyll of a single calendar day.
/// Both are `None` when the day has no valid value.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct DayRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Where the historical dataset ends.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LatestReading {
    /// `None` when the dataset only carries dates.
    pub timestamp: Option<NaiveDateTime>,
    pub date: NaiveDate,
}

/// The highest forecast value; the first one wins on ties.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ForecastPeak {
    pub timestamp: NaiveDateTime,
    pub value: f64,
    pub tier: RiskTier,
}

/// Whole-week forecast statistics over the valid points.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct ForecastSummary {
    pub mean: f64,
    pub max: f64,
    /// Points at or above the danger threshold.
    pub high_points: u32,
    pub count: u32,
}

/// Forecast statistics for one calendar day. The tier follows the day's
/// maximum, not its mean.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: u32,
    pub tier: RiskTier,
}

/// Everything the "current conditions" panel shows.
///
/// Each metric is the last valid value of its column, which may come from
/// an earlier row than `latest_time`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CurrentConditions {
    pub latest_time: Option<NaiveDateTime>,
    pub reference_date: Option<NaiveDate>,
    pub chlorophyll: Option<f64>,
    pub temperature: Option<f64>,
    pub dissolved_oxygen: Option<f64>,
    pub turbidity: Option<f64>,
    pub tier: RiskTier,
    pub today_range: DayRange,
}

/// What the forecast section can show.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub enum ForecastStatus {
    /// No forecast file, or no forecast column in it.
    Absent,
    /// A forecast was loaded but none of its points carry a value.
    NoValidValues,
    Available(ForecastSummary),
}
