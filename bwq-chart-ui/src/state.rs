//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use bwq_db::Database;
use chrono::NaiveDate;
use dioxus::prelude::*;

/// Shared state of the water-quality dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Database holding this pass's datasets (None until loaded)
    pub db: Signal<Option<Database>>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Problem with the historical dataset, shown above everything else
    pub notice: Signal<Option<String>>,
    /// Dates the forecast has values for
    pub forecast_dates: Signal<Vec<NaiveDate>>,
    /// Date picked in the per-day forecast selector
    pub selected_date: Signal<Option<NaiveDate>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            db: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            notice: Signal::new(None),
            forecast_dates: Signal::new(Vec::new()),
            selected_date: Signal::new(None),
        }
    }
}
