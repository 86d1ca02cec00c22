use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a metric's records are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// One record per day, keyed by ISO date.
    PerDay,
    /// One record per category label (country, protocol, content type).
    PerLabel,
}

/// Unit of the numeric values, so the rendering layer can format totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Count,
    Bytes,
}

/// Normalized dimension→value mapping produced by each extractor.
#[derive(Debug, Clone, Serialize)]
pub struct MetricResult {
    pub metric: String,
    pub unit: Unit,
    pub values: BTreeMap<String, u64>,
}

impl MetricResult {
    pub fn total(&self) -> u64 {
        self.values.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_all_values() {
        let mut values = BTreeMap::new();
        values.insert("2024-12-10".to_string(), 100);
        values.insert("2024-12-11".to_string(), 150);
        let result = MetricResult {
            metric: "requests".into(),
            unit: Unit::Count,
            values,
        };
        assert_eq!(result.total(), 250);
    }
}
