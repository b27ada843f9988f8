use chrono::{DateTime, Utc};
use core_types::{DetectionMethod, Direction, Severity};
use serde::{Deserialize, Serialize};
use statistics::Summary;
use std::collections::BTreeMap;

/// A single flagged observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    /// The method whose finding is reported (the most severe one after merging).
    pub method: DetectionMethod,
    pub severity: Severity,
    pub direction: Direction,
    /// Method-specific measurements such as `z_score`, `upper_fence` or `moving_average`.
    pub extra: BTreeMap<String, f64>,
    /// Every method that flagged this `(timestamp, value)` point.
    pub flagged_by: Vec<DetectionMethod>,
}

impl Anomaly {
    pub fn new(
        value: f64,
        timestamp: DateTime<Utc>,
        method: DetectionMethod,
        severity: Severity,
        direction: Direction,
    ) -> Self {
        Self {
            value,
            timestamp,
            method,
            severity,
            direction,
            extra: BTreeMap::new(),
            flagged_by: vec![method],
        }
    }

    /// Attaches a measurement, rounded to two decimals.
    pub fn with(mut self, key: &str, measurement: f64) -> Self {
        self.extra
            .insert(key.to_string(), (measurement * 100.0).round() / 100.0);
        self
    }

    pub fn is_alertable(&self) -> bool {
        self.severity >= Severity::Warning
    }
}

/// Outcome of running the ensemble on one series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Deduplicated anomalies, most severe first, then oldest first.
    pub anomalies: Vec<Anomaly>,
    /// Findings per method before deduplication.
    pub per_method_counts: BTreeMap<DetectionMethod, usize>,
    /// `None` when the series was too short to analyse.
    pub statistics: Option<Summary>,
    pub data_points: usize,
    pub insufficient_data: bool,
}

impl DetectionReport {
    pub fn insufficient(data_points: usize) -> Self {
        Self {
            data_points,
            insufficient_data: true,
            ..Self::default()
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.anomalies
            .iter()
            .filter(|a| a.severity == severity)
            .count()
    }
}
