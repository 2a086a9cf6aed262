//! The "today" card: current chlorophyll and its risk tier.

use bwq_core::metric::Metric;
use bwq_core::risk::legend;
use bwq_db::models::CurrentConditions;
use bwq_utils::format::format_value;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct StatusHeroProps {
    pub conditions: CurrentConditions,
}

/// "0–4 Good, 4–8 Caution, 8+ Danger"
fn threshold_note() -> String {
    legend()
        .iter()
        .map(|e| format!("{} {}", e.range_text(), e.tier.label()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
pub fn StatusHero(props: StatusHeroProps) -> Element {
    let c = props.conditions;
    let value = format_value(c.chlorophyll);
    let unit = Metric::Chlorophyll.unit();
    let tier = c.tier;
    let badge_style = format!(
        "display: inline-flex; gap: 6px; align-items: center; padding: 6px 14px; border-radius: 999px; border: 2px solid {}; background: #fff;",
        tier.color()
    );
    let label_style = format!("font-weight: 700; color: {};", tier.color());
    let note = threshold_note();
    let message = tier.message();
    let glyph = tier.glyph();
    let label = tier.label();

    rsx! {
        div {
            style: "display: flex; justify-content: space-between; gap: 16px; padding: 20px 24px; border-radius: 16px; background: linear-gradient(135deg, #0f766e, #1e3a8a); color: #fff;",
            div {
                div {
                    style: "font-size: 12px; letter-spacing: 0.08em; opacity: 0.8;",
                    "TODAY • BRISBANE RIVER • COLMSLIE"
                }
                div {
                    style: "font-size: 15px; margin-top: 4px;",
                    "Current chlorophyll"
                }
                div {
                    style: "display: flex; align-items: baseline; gap: 8px; margin: 6px 0;",
                    span { style: "font-size: 48px; font-weight: 700;", "{value}" }
                    span { style: "font-size: 16px; opacity: 0.85;", "{unit}" }
                }
                div { style: "font-size: 13px; opacity: 0.85;", "Algae concentration (chlorophyll)" }
                div { style: "font-size: 14px; margin-top: 8px;", "{message}" }
                div {
                    style: "font-size: 11px; margin-top: 6px; opacity: 0.75;",
                    "Reference: Australian guideline bands (µg/L): {note}"
                }
            }
            div {
                style: "display: flex; align-items: center;",
                div {
                    style: "{badge_style}",
                    span { "{glyph}" }
                    span { style: "{label_style}", "{label}" }
                }
            }
        }
    }
}
