//! Placeholders shown instead of content: notices, errors and the loading line.

use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoticeLevel {
    /// Expected absence, e.g. no forecast published
    Info,
    /// Data present but unusable
    Warning,
    /// Something failed while loading or querying
    Error,
}

impl NoticeLevel {
    fn style(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "background: #E3F2FD; color: #0D47A1; border: 1px solid #90CAF9;",
            NoticeLevel::Warning => "background: #FFF8E1; color: #8D6E00; border: 1px solid #FFE082;",
            NoticeLevel::Error => "background: #FFEBEE; color: #C62828; border: 1px solid #EF9A9A;",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "ℹ️ ",
            NoticeLevel::Warning => "⚠️ ",
            NoticeLevel::Error => "Error: ",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct InfoNoticeProps {
    pub message: String,
    #[props(default = NoticeLevel::Info)]
    pub level: NoticeLevel,
}

#[component]
pub fn InfoNotice(props: InfoNoticeProps) -> Element {
    let style = format!(
        "padding: 10px 14px; margin: 8px 0; border-radius: 6px; font-size: 14px; {}",
        props.level.style()
    );
    let prefix = props.level.prefix();
    rsx! {
        div {
            style: "{style}",
            strong { "{prefix}" }
            "{props.message}"
        }
    }
}

/// Shown until both datasets are parsed and loaded.
#[component]
pub fn LoadingNotice() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 40px; color: #666;",
            "Loading river data..."
        }
    }
}
