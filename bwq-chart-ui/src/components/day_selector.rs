//! Per-day forecast summary with a date dropdown.

use crate::components::{InfoNotice, NoticeLevel};
use crate::state::AppState;
use bwq_utils::dates::{format_date, parse_date};
use bwq_utils::format::format_value;
use dioxus::prelude::*;

/// Date dropdown over the forecast days.
/// Reads `forecast_dates` from AppState and updates `selected_date` on change;
/// the summary of the selected day is queried from the database.
#[component]
pub fn DaySelector() -> Element {
    let mut state = use_context::<AppState>();
    let dates: Vec<String> = state.forecast_dates.read().iter().map(format_date).collect();
    let selected = (state.selected_date)();
    let selected_str = selected.as_ref().map(format_date).unwrap_or_default();

    let summary = match (state.db.read().as_ref(), selected) {
        (Some(db), Some(date)) => db.query_day_summary(date).unwrap_or_else(|e| {
            log::error!("Failed to query day summary: {}", e);
            None
        }),
        _ => None,
    };

    let on_change = move |evt: Event<FormData>| match parse_date(&evt.value()) {
        Ok(date) => state.selected_date.set(Some(date)),
        Err(e) => log::warn!("Ignoring unparseable date selection: {}", e),
    };

    let summary_view = match summary {
        Some(s) => {
            let title = format!("{} forecast summary", format_date(&s.date));
            let values = format!(
                "mean {} · min {} · max {} µg/L",
                format_value(Some(s.mean)),
                format_value(Some(s.min)),
                format_value(Some(s.max))
            );
            let tier_style = format!("color: {}; font-weight: 600;", s.tier.color());
            let glyph = s.tier.glyph();
            let label = s.tier.label();
            rsx! {
                div {
                    style: "background: #fff; border-radius: 10px; padding: 10px 12px;",
                    div { style: "font-size: 12px; color: #6b7280;", "{title}" }
                    div { style: "font-size: 15px; font-weight: 600;", "{values}" }
                    div {
                        style: "margin-top: 4px; font-size: 13px;",
                        "{glyph} "
                        span { style: "{tier_style}", "{label}" }
                        " levels may occur on this day."
                    }
                }
            }
        }
        None => rsx! {
            InfoNotice {
                message: "No forecast data for the selected date.".to_string(),
                level: NoticeLevel::Info,
            }
        },
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "forecast-day-select",
                style: "font-weight: bold; margin-right: 8px; font-size: 13px;",
                "Date: "
            }
            select {
                id: "forecast-day-select",
                onchange: on_change,
                for date in dates.iter() {
                    option {
                        value: "{date}",
                        selected: *date == selected_str,
                        "{date}"
                    }
                }
            }
        }
        {summary_view}
    }
}
