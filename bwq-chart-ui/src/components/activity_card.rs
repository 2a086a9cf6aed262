//! Activity recommendation for the current tier.

use bwq_core::risk::RiskTier;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ActivityCardProps {
    pub tier: RiskTier,
}

#[component]
pub fn ActivityCard(props: ActivityCardProps) -> Element {
    let style = format!(
        "margin: 12px 0; padding: 12px 16px; border-radius: 12px; background: #fff; border-left: 5px solid {};",
        props.tier.color()
    );
    let activity = props.tier.activity();
    rsx! {
        div {
            style: "{style}",
            div {
                style: "font-size: 13px; font-weight: 600; color: #374151; margin-bottom: 4px;",
                "Activity recommendation"
            }
            div { style: "font-size: 14px;", "{activity}" }
        }
    }
}
