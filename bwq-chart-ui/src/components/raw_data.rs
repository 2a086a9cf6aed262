//! Raw-data table and the full-history CSV download.

use crate::js_bridge;
use crate::state::AppState;
use bwq_core::export::{export_history_csv, EXPORT_FILE_NAME};
use bwq_core::metric::Metric;
use bwq_core::reading::SensorReading;
use bwq_utils::format::{format_reading_time, format_value};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct RecentTableProps {
    pub rows: Vec<SensorReading>,
}

/// Recent readings, oldest first, in a scrollable table.
#[component]
pub fn RecentTable(props: RecentTableProps) -> Element {
    let headers: Vec<String> = Metric::ALL
        .iter()
        .map(|m| format!("{} ({})", m.label(), m.unit()))
        .collect();
    let rows: Vec<(String, Vec<String>)> = props
        .rows
        .iter()
        .map(|r| {
            (
                format_reading_time(r),
                Metric::ALL.iter().map(|m| format_value(r.value(*m))).collect(),
            )
        })
        .collect();

    rsx! {
        div {
            style: "max-height: 320px; overflow-y: auto; border: 1px solid #e5e7eb; border-radius: 8px; background: #fff;",
            table {
                style: "width: 100%; border-collapse: collapse; font-size: 12px;",
                thead {
                    tr {
                        th { style: "text-align: left; padding: 6px 8px; position: sticky; top: 0; background: #f9fafb;", "Time" }
                        for h in headers.iter() {
                            th { style: "text-align: right; padding: 6px 8px; position: sticky; top: 0; background: #f9fafb;", "{h}" }
                        }
                    }
                }
                tbody {
                    for (i, (time, values)) in rows.iter().enumerate() {
                        tr {
                            key: "{i}",
                            td { style: "padding: 4px 8px; border-top: 1px solid #f3f4f6;", "{time}" }
                            for v in values.iter() {
                                td { style: "padding: 4px 8px; text-align: right; border-top: 1px solid #f3f4f6;", "{v}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Button that downloads the full historical dataset as CSV.
#[component]
pub fn DownloadButton() -> Element {
    let state = use_context::<AppState>();

    let on_click = move |_| {
        let db = match &*state.db.read() {
            Some(db) => db.clone(),
            None => return,
        };
        let text = db
            .query_readings()
            .and_then(|rows| Ok(export_history_csv(&rows)?))
            .and_then(|bytes| Ok(String::from_utf8(bytes)?));
        match text {
            Ok(text) => js_bridge::download_csv(EXPORT_FILE_NAME, &text),
            Err(e) => log::error!("CSV export failed: {}", e),
        }
    };

    rsx! {
        button {
            style: "margin-top: 8px; padding: 8px 14px; border-radius: 8px; border: 1px solid #1e3a8a; background: #1e3a8a; color: #fff; cursor: pointer;",
            onclick: on_click,
            "⬇ Download full data (CSV)"
        }
    }
}
