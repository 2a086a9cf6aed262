//! Brisbane River Water-Quality Dashboard
//!
//! Shows the current chlorophyll level at Colmslie with its risk tier, the
//! supporting measurements, the weekly chlorophyll forecast as an animated
//! D3.js chart, and the recent raw readings with a CSV download.
//!
//! Data flow:
//! 1. `build.rs` copies `df_final.csv` and `future_week_forecast.csv` into
//!    OUT_DIR and flags which of them exist.
//! 2. `include_str!` embeds both into the WASM binary.
//! 3. On mount: parse both datasets and load them into the in-memory database.
//! 4. Once loaded: build the animation frames and render the chart via D3.js.

use bwq_chart_ui::components::{
    ActivityCard, DaySelector, DownloadButton, ForecastChart, ForecastSummaryChips,
    GradeLegend, InfoNotice, LoadingNotice, MetricChip, NoticeLevel, PeakNotice, RecentTable,
    SectionHeader, StatusHero,
};
use bwq_chart_ui::js_bridge;
use bwq_chart_ui::state::AppState;
use bwq_core::forecast::forecast_from_source;
use bwq_core::metric::Metric;
use bwq_core::reading::History;
use bwq_data::chart::AnimationPayload;
use bwq_data::frames::DEFAULT_FRAME_STEP;
use bwq_db::models::ForecastStatus;
use bwq_db::{Database, RECENT_DAYS, RECENT_LIMIT};
use bwq_utils::format::{format_latest_time, format_metric, format_range};
use dioxus::prelude::*;

const HISTORY_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/df_final.csv"));
const FORECAST_CSV: &str = include_str!(concat!(env!("OUT_DIR"), "/future_week_forecast.csv"));
/// Name shown in the "not found" notice when the history was missing at build time.
const HISTORY_FILE_NAME: &str = "df_final.csv";
const HISTORY_PRESENT: &str = env!("BWQ_HISTORY_PRESENT");
const FORECAST_PRESENT: &str = env!("BWQ_FORECAST_PRESENT");

/// DOM id for the D3 chart container div.
const CHART_CONTAINER_ID: &str = "forecast-chart";

/// Delay between animation frames in the browser.
const FRAME_DELAY_MS: u32 = 30;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("water-quality-root"))
        .launch(App);
}

/// The embedded text of a dataset, `None` when the file was missing at build time.
fn embedded(csv_data: &'static str, present: &str) -> Option<&'static str> {
    (present == "1").then_some(csv_data)
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Effect 1: Parse both datasets once on mount ───
    use_effect(move || {
        let history = History::from_source(embedded(HISTORY_CSV, HISTORY_PRESENT), HISTORY_FILE_NAME);
        let forecast = forecast_from_source(embedded(FORECAST_CSV, FORECAST_PRESENT));

        match Database::with_datasets(&history.readings, forecast.as_deref()) {
            Ok(db) => {
                let dates = db.query_forecast_dates().unwrap_or_else(|e| {
                    log::error!("Failed to query forecast dates: {}", e);
                    Vec::new()
                });
                state.selected_date.set(dates.first().copied());
                state.forecast_dates.set(dates);
                state.db.set(Some(db));
            }
            Err(e) => {
                log::error!("Failed to load datasets: {}", e);
                state.error_msg.set(Some(format!("Failed to load data: {}", e)));
            }
        }
        state.notice.set(history.notice);
        state.loading.set(false);

        // Initialize D3 chart scripts (one-time)
        js_bridge::init_charts();
    });

    // ─── Effect 2: Build the animation frames and render the chart ───
    // Re-runs whenever loading or the database change.
    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };

        let series = match db.query_forecast_series() {
            Ok(series) if !series.is_empty() => series,
            Ok(_) => return,
            Err(e) => {
                log::error!("Failed to query forecast series: {}", e);
                return;
            }
        };

        let payload = AnimationPayload::new(&series, DEFAULT_FRAME_STEP);
        let payload_json = match serde_json::to_string(&payload) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize animation frames: {}", e);
                return;
            }
        };
        let config_json = serde_json::json!({
            "yAxisLabel": format!("{} ({})", Metric::Chlorophyll.label(), Metric::Chlorophyll.unit()),
            "color": "#2563eb",
            "frameDelayMs": FRAME_DELAY_MS,
        })
        .to_string();

        js_bridge::render_forecast_chart(CHART_CONTAINER_ID, &payload_json, &config_json);
    });

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 12px; font-family: system-ui, -apple-system, sans-serif; background: #f1f5f9;",

            if let Some(err) = state.error_msg.read().as_ref() {
                InfoNotice { message: err.clone(), level: NoticeLevel::Error }
            }
            if let Some(notice) = state.notice.read().as_ref() {
                InfoNotice { message: notice.clone(), level: NoticeLevel::Warning }
            }

            if *state.loading.read() {
                LoadingNotice {}
            } else {
                CurrentSection {}
                ForecastSection {}
                RawDataSection {}
            }
        }
    }
}

/// Hero card, side chips, activity recommendation and legend.
#[component]
fn CurrentSection() -> Element {
    let state = use_context::<AppState>();
    let conditions = match &*state.db.read() {
        Some(db) => db.query_current_conditions(),
        None => return rsx! {},
    };
    let c = match conditions {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to query current conditions: {}", e);
            return rsx! {
                InfoNotice {
                    message: format!("Failed to read current conditions: {}", e),
                    level: NoticeLevel::Error,
                }
            };
        }
    };
    let tier = c.tier;

    rsx! {
        div {
            style: "display: grid; grid-template-columns: 2fr 1fr; gap: 12px;",
            StatusHero { conditions: c }
            div {
                style: "display: flex; flex-direction: column; gap: 8px;",
                MetricChip {
                    label: "Today's range".to_string(),
                    value: format_range(c.today_range.min, c.today_range.max),
                }
                MetricChip {
                    label: Metric::Temperature.label().to_string(),
                    value: format_metric(Metric::Temperature, c.temperature),
                }
                MetricChip {
                    label: Metric::Turbidity.label().to_string(),
                    value: format_metric(Metric::Turbidity, c.turbidity),
                }
                MetricChip {
                    label: Metric::DissolvedOxygen.label().to_string(),
                    value: format_metric(Metric::DissolvedOxygen, c.dissolved_oxygen),
                }
                MetricChip {
                    label: "Last update".to_string(),
                    value: format_latest_time(c.latest_time),
                }
            }
        }
        ActivityCard { tier: tier }
        GradeLegend {}
    }
}

/// Weekly forecast: summary chips, day selector, animated chart, peak.
#[component]
fn ForecastSection() -> Element {
    let state = use_context::<AppState>();
    let db = match &*state.db.read() {
        Some(db) => db.clone(),
        None => return rsx! {},
    };

    let status = db.query_forecast_status().unwrap_or_else(|e| {
        log::error!("Failed to query forecast status: {}", e);
        ForecastStatus::Absent
    });

    let body = match status {
        ForecastStatus::Absent => rsx! {
            InfoNotice {
                message: "No forecast is available, so the weekly outlook cannot be shown.".to_string(),
                level: NoticeLevel::Info,
            }
        },
        ForecastStatus::NoValidValues => rsx! {
            InfoNotice {
                message: "The forecast holds no valid values.".to_string(),
                level: NoticeLevel::Warning,
            }
        },
        ForecastStatus::Available(summary) => {
            let peak = db.query_forecast_peak().unwrap_or_else(|e| {
                log::error!("Failed to query forecast peak: {}", e);
                None
            });
            rsx! {
                ForecastSummaryChips { summary: summary }
                DaySelector {}
                ForecastChart { id: CHART_CONTAINER_ID.to_string() }
                if let Some(peak) = peak {
                    PeakNotice { peak: peak }
                }
            }
        }
    };

    rsx! {
        SectionHeader {
            icon: "📈".to_string(),
            title: "Weekly chlorophyll forecast".to_string(),
            description: "Forecast for the coming week, coloured by risk band. Press play to animate.".to_string(),
        }
        {body}
    }
}

/// Recent readings table and the full-history download.
#[component]
fn RawDataSection() -> Element {
    let state = use_context::<AppState>();
    let rows = match &*state.db.read() {
        Some(db) => db
            .query_recent_readings(RECENT_DAYS, RECENT_LIMIT)
            .unwrap_or_else(|e| {
                log::error!("Failed to query recent readings: {}", e);
                Vec::new()
            }),
        None => Vec::new(),
    };
    let description = format!(
        "Readings from the last {} days, up to {} rows.",
        RECENT_DAYS, RECENT_LIMIT
    );

    rsx! {
        SectionHeader {
            icon: "🗂".to_string(),
            title: "Raw data".to_string(),
            description: description,
        }
        RecentTable { rows: rows }
        DownloadButton {}
    }
}
