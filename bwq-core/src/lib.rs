//! Core types for Brisbane River water-quality data.
//!
//! Holds the typed row records of the two upstream datasets (historical
//! Kalman-filtered sensor readings and the week-ahead chlorophyll forecast),
//! their CSV loading rules, the chlorophyll risk tiers, and the raw-data
//! export.
//!
//! ```rust
//! use bwq_core::reading::History;
//! use bwq_core::risk::{classify, RiskTier};
//!
//! let history = History::from_csv(
//!     "Timestamp,Chlorophyll_Kalman\n2024-11-03 00:00:00,5.2\n",
//! );
//! assert_eq!(history.readings.len(), 1);
//! assert_eq!(classify(history.readings[0].chlorophyll), RiskTier::Caution);
//! ```

pub mod error;
pub mod export;
pub mod forecast;
pub mod metric;
pub mod reading;
pub mod risk;
#[cfg(feature = "fs")]
pub mod source;
pub mod timestamp;
