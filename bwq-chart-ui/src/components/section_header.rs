//! Heading of a dashboard section.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SectionHeaderProps {
    pub icon: String,
    pub title: String,
    #[props(default = String::new())]
    pub description: String,
}

#[component]
pub fn SectionHeader(props: SectionHeaderProps) -> Element {
    let heading = format!("{} {}", props.icon, props.title);
    rsx! {
        div {
            style: "margin: 24px 0 8px 0; padding-bottom: 4px; border-bottom: 2px solid #cbd5e1;",
            h3 { style: "margin: 0; font-size: 18px; color: #0f172a;", "{heading}" }
            if !props.description.is_empty() {
                p { style: "margin: 4px 0 0 0; font-size: 13px; color: #475569;", "{props.description}" }
            }
        }
    }
}
