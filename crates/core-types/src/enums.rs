use serde::{Deserialize, Serialize};
use std::fmt;

/// How bad an anomaly is.
///
/// The variant order is the ranking used when several detectors flag the same
/// point: `Notable < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Notable,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Notable => "notable",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// The statistical method that flagged an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    ZScore,
    Iqr,
    Spc,
    MovingAverage,
}

impl DetectionMethod {
    /// All methods, in the order the ensemble runs them.
    pub const ALL: [DetectionMethod; 4] = [
        DetectionMethod::ZScore,
        DetectionMethod::Iqr,
        DetectionMethod::Spc,
        DetectionMethod::MovingAverage,
    ];
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DetectionMethod::ZScore => "z_score",
            DetectionMethod::Iqr => "iqr",
            DetectionMethod::Spc => "spc",
            DetectionMethod::MovingAverage => "moving_average",
        };
        f.write_str(s)
    }
}

/// Which side of the expected value a point fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    /// Direction of `value` relative to `reference`. Ties count as `Below`.
    pub fn of(value: f64, reference: f64) -> Self {
        if value > reference {
            Direction::Above
        } else {
            Direction::Below
        }
    }
}

/// Direction of a fitted linear trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Qualitative confidence attached to a forecast or to a whole history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Whether a larger raw metric value is an improvement or a regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// e.g. conversion rate, engagement rate.
    HigherIsBetter,
    /// e.g. cost-per-click, response time, sales cycle length.
    LowerIsBetter,
}

/// Forecast horizons produced by the forecasting ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "7_days")]
    Week,
    #[serde(rename = "30_days")]
    Month,
    #[serde(rename = "60_days")]
    TwoMonths,
    #[serde(rename = "90_days")]
    Quarter,
}

impl Horizon {
    pub const ALL: [Horizon; 4] = [
        Horizon::Week,
        Horizon::Month,
        Horizon::TwoMonths,
        Horizon::Quarter,
    ];

    /// Length of the horizon in days.
    pub fn days(self) -> u32 {
        match self {
            Horizon::Week => 7,
            Horizon::Month => 30,
            Horizon::TwoMonths => 60,
            Horizon::Quarter => 90,
        }
    }

    /// Confidence label for a projection over this horizon. Longer horizons are
    /// less certain.
    pub fn confidence(self) -> ConfidenceLevel {
        match self {
            Horizon::Week => ConfidenceLevel::High,
            Horizon::Month | Horizon::TwoMonths => ConfidenceLevel::Medium,
            Horizon::Quarter => ConfidenceLevel::Low,
        }
    }
}
