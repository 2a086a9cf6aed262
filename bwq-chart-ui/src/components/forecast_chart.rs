//! Host element of the animated D3.js forecast chart.

use crate::js_bridge;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ForecastChartProps {
    /// DOM id D3 renders into; the app's render effect targets the same id
    pub id: String,
    #[props(default = 460)]
    pub min_height: u32,
}

/// Card holding the chart. D3 owns everything inside the inner div,
/// including the play button and the frame slider. The running animation
/// is stopped when the card unmounts.
#[component]
pub fn ForecastChart(props: ForecastChartProps) -> Element {
    let id = props.id.clone();
    use_drop(move || js_bridge::destroy_chart(&id));

    let style = format!(
        "min-height: {}px; margin-top: 8px; background: #fff; border-radius: 12px; padding: 8px; box-sizing: border-box;",
        props.min_height
    );

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
            p {
                style: "font-size: 11px; color: #888; text-align: center; margin: 4px 0 0 0;",
                "Background bands follow the risk tiers; dashed lines mark the tier boundaries."
            }
        }
    }
}
