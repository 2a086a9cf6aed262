//! Small labelled value box.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct MetricChipProps {
    pub label: String,
    pub value: String,
}

#[component]
pub fn MetricChip(props: MetricChipProps) -> Element {
    rsx! {
        div {
            style: "background: rgba(255,255,255,0.92); border-radius: 10px; padding: 8px 12px; box-shadow: 0 1px 3px rgba(0,0,0,0.08);",
            div {
                style: "font-size: 12px; color: #6b7280;",
                "{props.label}"
            }
            div {
                style: "font-size: 16px; font-weight: 600; color: #111827;",
                "{props.value}"
            }
        }
    }
}
