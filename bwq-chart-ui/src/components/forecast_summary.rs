//! Whole-week forecast chips and the peak notice.

use crate::components::MetricChip;
use bwq_core::metric::Metric;
use bwq_core::risk::danger_threshold;
use bwq_db::models::{ForecastPeak, ForecastSummary};
use bwq_utils::dates::format_time;
use bwq_utils::format::{format_metric, format_value};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ForecastSummaryChipsProps {
    pub summary: ForecastSummary,
}

#[component]
pub fn ForecastSummaryChips(props: ForecastSummaryChipsProps) -> Element {
    let s = props.summary;
    rsx! {
        div {
            style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 8px;",
            MetricChip { label: "Mean".to_string(), value: format_value(Some(s.mean)) }
            MetricChip { label: "Max".to_string(), value: format_value(Some(s.max)) }
            MetricChip {
                label: format!("Danger (≥{})", danger_threshold()),
                value: format!("{} points", s.high_points),
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct PeakNoticeProps {
    pub peak: ForecastPeak,
}

/// When the forecast expects the highest concentration.
#[component]
pub fn PeakNotice(props: PeakNoticeProps) -> Element {
    let p = props.peak;
    let when = format_time(&p.timestamp);
    let value = format_metric(Metric::Chlorophyll, Some(p.value));
    let tier = format!("{} {}", p.tier.glyph(), p.tier.label());
    rsx! {
        div {
            style: "margin-top: 8px; font-size: 14px; color: #1f2937;",
            "🔎 The highest concentration in the forecast is expected at "
            b { "{when}" }
            ", at about "
            b { "{value}" }
            " ({tier})."
        }
    }
}
