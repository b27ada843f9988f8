use configuration::ForecastSettings;
use core_types::{ConfidenceLevel, Trend};
use serde::{Deserialize, Serialize};
use statistics::{LinearFit, coefficient_of_variation, std_dev};

/// How well the linear trend explains the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
}

impl TrendStrength {
    pub fn from_r_squared(r_squared: f64) -> Self {
        if r_squared >= 0.7 {
            TrendStrength::Strong
        } else if r_squared >= 0.4 {
            TrendStrength::Moderate
        } else {
            TrendStrength::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub direction: Trend,
    pub slope: f64,
    pub r_squared: f64,
    pub strength: TrendStrength,
}

impl From<&LinearFit> for TrendSummary {
    fn from(fit: &LinearFit) -> Self {
        Self {
            direction: fit.trend,
            slope: fit.slope,
            r_squared: fit.r_squared,
            strength: TrendStrength::from_r_squared(fit.r_squared),
        }
    }
}

/// Recent revenue totals, rounded to whole currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentMetrics {
    /// Last seven days divided by seven.
    pub daily_average: i64,
    pub weekly_total: i64,
    /// Up to the last thirty days.
    pub monthly_total: i64,
    pub last_day: i64,
}

impl CurrentMetrics {
    pub fn from_values(values: &[f64]) -> Self {
        let trailing = |days: usize| values[values.len().saturating_sub(days)..].iter().sum::<f64>();
        let week = trailing(7);
        Self {
            daily_average: (week / 7.0).round() as i64,
            weekly_total: week.round() as i64,
            monthly_total: trailing(30).round() as i64,
            last_day: values.last().copied().unwrap_or(0.0).round() as i64,
        }
    }
}

/// How consistent the history is, judged by its coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSummary {
    pub level: ConfidenceLevel,
    /// 85, 70 or 55.
    pub percentage: u8,
    pub std_deviation: f64,
    /// Sample coefficient of variation in percent.
    pub coefficient_of_variation: f64,
}

impl ConfidenceSummary {
    pub fn from_values(values: &[f64], settings: &ForecastSettings) -> Self {
        let cv = coefficient_of_variation(values);
        let level = if cv < settings.cv_high {
            ConfidenceLevel::High
        } else if cv < settings.cv_medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };
        let percentage = match level {
            ConfidenceLevel::High => 85,
            ConfidenceLevel::Medium => 70,
            ConfidenceLevel::Low => 55,
        };
        Self {
            level,
            percentage,
            std_deviation: std_dev(values).round(),
            coefficient_of_variation: (cv * 10.0).round() / 10.0,
        }
    }
}
