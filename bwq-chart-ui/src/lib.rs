//! Shared Dioxus components and D3.js bridge for the water-quality dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js forecast chart and the CSV download via `js_sys::eval()`
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (status card, chips, legend, selectors, tables)

pub mod js_bridge;
pub mod state;
pub mod components;
