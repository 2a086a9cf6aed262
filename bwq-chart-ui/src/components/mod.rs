//! Reusable Dioxus RSX components for the water-quality dashboard.

mod activity_card;
mod day_selector;
mod forecast_chart;
mod forecast_summary;
mod grade_legend;
mod metric_chip;
mod notices;
mod raw_data;
mod section_header;
mod status_hero;

pub use activity_card::ActivityCard;
pub use day_selector::DaySelector;
pub use forecast_chart::ForecastChart;
pub use forecast_summary::{ForecastSummaryChips, PeakNotice};
pub use grade_legend::GradeLegend;
pub use metric_chip::MetricChip;
pub use notices::{InfoNotice, LoadingNotice, NoticeLevel};
pub use raw_data::{DownloadButton, RecentTable};
pub use section_header::SectionHeader;
pub use status_hero::StatusHero;
