//! Legend of the chlorophyll risk tiers.

use bwq_core::metric::Metric;
use bwq_core::risk::legend;
use dioxus::prelude::*;

/// Display strings of one legend row.
struct LegendRow {
    key: &'static str,
    glyph: &'static str,
    chip_style: String,
    label_style: String,
    range: String,
}

#[component]
pub fn GradeLegend() -> Element {
    let unit = Metric::Chlorophyll.unit();
    let rows: Vec<LegendRow> = legend()
        .iter()
        .map(|entry| LegendRow {
            key: entry.tier.label(),
            glyph: entry.tier.glyph(),
            chip_style: format!(
                "display: flex; align-items: center; gap: 6px; padding: 4px 10px; border-radius: 8px; background: {};",
                entry.tier.band_color()
            ),
            label_style: format!("font-weight: 600; color: {};", entry.tier.color()),
            range: format!("{} {}", entry.range_text(), unit),
        })
        .collect();

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 10px; margin: 8px 0; font-size: 13px;",
            for row in rows.iter() {
                div {
                    key: "{row.key}",
                    style: "{row.chip_style}",
                    span { "{row.glyph}" }
                    span { style: "{row.label_style}", "{row.key}" }
                    span { "{row.range}" }
                }
            }
        }
    }
}
