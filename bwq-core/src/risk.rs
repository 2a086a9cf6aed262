//! Chlorophyll risk tiers.
//!
//! Thresholds follow the Australian guideline bands used on the river signage:
//! 0–4 µg/L good, 4–8 µg/L caution, 8 µg/L and above danger. The ladder below
//! is the only place they are written down; the legend, the forecast
//! high-point count and the chart risk bands are all derived from it.

use serde::{Deserialize, Serialize};

/// Coarse-grained risk classification of a chlorophyll concentration.
///
/// Variants are declared in severity order, so `Ord` compares severity.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Unknown,
    Good,
    Caution,
    Danger,
}

/// Ordered `(exclusive upper bound, tier)` pairs, evaluated top to bottom.
pub const TIER_LADDER: [(f64, RiskTier); 3] = [
    (4.0, RiskTier::Good),
    (8.0, RiskTier::Caution),
    (f64::INFINITY, RiskTier::Danger),
];

/// Classify a chlorophyll reading in µg/L. `None` and NaN are `Unknown`.
pub fn classify(value: Option<f64>) -> RiskTier {
    let value = match value {
        Some(v) if !v.is_nan() => v,
        _ => return RiskTier::Unknown,
    };
    TIER_LADDER
        .iter()
        .find(|(upper, _)| value < *upper)
        .map(|(_, tier)| *tier)
        .unwrap_or(RiskTier::Danger)
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Unknown => "Unknown",
            RiskTier::Good => "Good",
            RiskTier::Caution => "Caution",
            RiskTier::Danger => "Danger",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            RiskTier::Unknown => "⚪",
            RiskTier::Good => "🟢",
            RiskTier::Caution => "🟡",
            RiskTier::Danger => "🔴",
        }
    }

    /// Text/border color for badges.
    pub fn color(&self) -> &'static str {
        match self {
            RiskTier::Unknown => "#9ca3af",
            RiskTier::Good => "#22c55e",
            RiskTier::Caution => "#eab308",
            RiskTier::Danger => "#ef4444",
        }
    }

    /// Fill color of the tier's horizontal band on the forecast chart.
    pub fn band_color(&self) -> &'static str {
        match self {
            RiskTier::Unknown => "#e5e7eb",
            RiskTier::Good => "#d0f0c0",
            RiskTier::Caution => "#fff3b0",
            RiskTier::Danger => "#ffc9c9",
        }
    }

    /// Advisory sentence shown under the current value.
    pub fn message(&self) -> &'static str {
        match self {
            RiskTier::Unknown => "Not enough data for a reliable diagnosis of current conditions.",
            RiskTier::Good => {
                "Normal levels. Generally safe for riverside walks and water recreation."
            }
            RiskTier::Caution => {
                "Algae concentration is somewhat elevated and may vary considerably with weather and rainfall."
            }
            RiskTier::Danger => {
                "Algae concentration is high. Please check official advice before any water recreation."
            }
        }
    }

    /// Recommendation for outdoor and on-water activities.
    pub fn activity(&self) -> &'static str {
        match self {
            RiskTier::Unknown => {
                "⚪ Not enough data for detailed activity advice. Refer to on-site signs and public information."
            }
            RiskTier::Good => {
                "👟 Riverside walks, jogging and cycling are fine at this level."
            }
            RiskTier::Caution => {
                "🚣 Algae levels are somewhat high. Check on-site signs and official notices before swimming or kayaking."
            }
            RiskTier::Danger => {
                "⛔ Water quality is poor. Avoid swimming and letting pets into the water, and check council advice before water sports."
            }
        }
    }
}

/// One row of the tier legend: `lower ≤ value < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendEntry {
    pub tier: RiskTier,
    pub lower: f64,
    /// `None` for the open-ended top tier.
    pub upper: Option<f64>,
}

impl LegendEntry {
    /// Range text such as `0–4` or `8+`.
    pub fn range_text(&self) -> String {
        match self.upper {
            Some(upper) => format!("{}–{}", self.lower, upper),
            None => format!("{}+", self.lower),
        }
    }
}

/// Legend rows for every classified tier, lowest first.
pub fn legend() -> Vec<LegendEntry> {
    let mut lower = 0.0;
    TIER_LADDER
        .iter()
        .map(|(upper, tier)| {
            let entry = LegendEntry {
                tier: *tier,
                lower,
                upper: upper.is_finite().then_some(*upper),
            };
            lower = *upper;
            entry
        })
        .collect()
}

/// Inclusive lower bound of a tier, `None` for `Unknown`.
pub fn lower_bound(tier: RiskTier) -> Option<f64> {
    legend()
        .into_iter()
        .find(|entry| entry.tier == tier)
        .map(|entry| entry.lower)
}

/// Values at or above this are `Danger`.
pub fn danger_threshold() -> f64 {
    lower_bound(RiskTier::Danger).unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_follow_closed_open_ladder() {
        assert_eq!(classify(Some(3.999)), RiskTier::Good);
        assert_eq!(classify(Some(4.0)), RiskTier::Caution);
        assert_eq!(classify(Some(7.999)), RiskTier::Caution);
        assert_eq!(classify(Some(8.0)), RiskTier::Danger);
        assert_eq!(classify(Some(250.0)), RiskTier::Danger);
        assert_eq!(classify(Some(0.0)), RiskTier::Good);
    }

    #[test]
    fn null_and_nan_are_unknown() {
        assert_eq!(classify(None), RiskTier::Unknown);
        assert_eq!(classify(Some(f64::NAN)), RiskTier::Unknown);
    }

    #[test]
    fn classification_is_monotonic() {
        let values: Vec<f64> = (0..200).map(|i| i as f64 * 0.07).collect();
        for pair in values.windows(2) {
            let (low, high) = (classify(Some(pair[0])), classify(Some(pair[1])));
            assert!(low <= high, "{} -> {:?} but {} -> {:?}", pair[0], low, pair[1], high);
            assert_ne!(low, RiskTier::Unknown);
        }
    }

    #[test]
    fn legend_is_derived_from_ladder() {
        let entries = legend();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].range_text(), "0–4");
        assert_eq!(entries[1].range_text(), "4–8");
        assert_eq!(entries[2].range_text(), "8+");
        assert_eq!(danger_threshold(), 8.0);
        assert_eq!(lower_bound(RiskTier::Caution), Some(4.0));
        assert_eq!(lower_bound(RiskTier::Unknown), None);
    }

    #[test]
    fn legend_lower_bounds_classify_into_their_tier() {
        for entry in legend() {
            assert_eq!(classify(Some(entry.lower)), entry.tier);
        }
    }
}
