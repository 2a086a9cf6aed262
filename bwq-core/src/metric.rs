use serde::{Deserialize, Serialize};

/// CSV header of the timestamp column in both datasets.
pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// CSV header of the date-only column used when a file has no timestamps.
pub const DATE_COLUMN: &str = "date";

/// CSV header of the predicted chlorophyll column in the forecast dataset.
pub const FORECAST_COLUMN: &str = "Forecast_Chlorophyll_Kalman";

/// A Kalman-filtered measurement column of the historical dataset.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Metric {
    Chlorophyll,
    Temperature,
    DissolvedOxygen,
    Turbidity,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Chlorophyll,
        Metric::Temperature,
        Metric::DissolvedOxygen,
        Metric::Turbidity,
    ];

    /// Header of this metric in the historical CSV.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Chlorophyll => "Chlorophyll_Kalman",
            Metric::Temperature => "Temperature_Kalman",
            Metric::DissolvedOxygen => "Dissolved Oxygen_Kalman",
            Metric::Turbidity => "Turbidity_Kalman",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Chlorophyll => "Chlorophyll",
            Metric::Temperature => "Water temperature",
            Metric::DissolvedOxygen => "Dissolved oxygen",
            Metric::Turbidity => "Turbidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Chlorophyll => "µg/L",
            Metric::Temperature => "°C",
            Metric::DissolvedOxygen => "mg/L",
            Metric::Turbidity => "NTU",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Metric;

    #[test]
    fn columns_match_upstream_headers() {
        let columns: Vec<&str> = Metric::ALL.iter().map(|m| m.column()).collect();
        assert_eq!(
            columns,
            vec![
                "Chlorophyll_Kalman",
                "Temperature_Kalman",
                "Dissolved Oxygen_Kalman",
                "Turbidity_Kalman",
            ]
        );
    }
}
