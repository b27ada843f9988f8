use crate::growth::GrowthRate;
use crate::indicators::{ConfidenceSummary, TrendSummary};
use core_types::{ConfidenceLevel, Trend};
use serde::{Deserialize, Serialize};

/// Score of a forecast with no trend, no fit and no growth.
pub const NEUTRAL_FORECAST_SCORE: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            50.. => RiskLevel::High,
            25..=49 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    DecliningTrend,
    NegativeGrowth,
    InconsistentHistory,
    HighVolatility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub factors: Vec<RiskFactor>,
}

/// Scores how much the revenue outlook should worry the business owner.
///
/// `volatility_threshold` is the coefficient of variation (percent) above which the
/// history is flagged as highly volatile.
pub fn assess_risk(
    trend: &TrendSummary,
    growth: &GrowthRate,
    confidence: &ConfidenceSummary,
    volatility_threshold: f64,
) -> RiskAssessment {
    let mut score: u32 = 0;
    let mut factors = Vec::new();

    if trend.direction == Trend::Down {
        score += 30;
        factors.push(RiskFactor::DecliningTrend);
    }
    // unpredictable
    if trend.r_squared < 0.3 {
        score += 20;
    }
    if growth.monthly < -10.0 {
        score += 25;
    }
    if growth.monthly < 0.0 {
        score += 10;
        factors.push(RiskFactor::NegativeGrowth);
    }
    match confidence.level {
        ConfidenceLevel::Low => score += 15,
        ConfidenceLevel::Medium => score += 5,
        ConfidenceLevel::High => {}
    }
    if confidence.level != ConfidenceLevel::High {
        factors.push(RiskFactor::InconsistentHistory);
    }
    if confidence.coefficient_of_variation > volatility_threshold {
        factors.push(RiskFactor::HighVolatility);
    }

    let score = score.min(100) as u8;
    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        factors,
    }
}

/// Overall outlook on 0..=100: 50, plus or minus 20 for the trend direction, plus up
/// to 15 for the fit, plus monthly growth capped at 15 points either way.
pub fn forecast_score(trend: &TrendSummary, growth: &GrowthRate) -> u8 {
    let direction = match trend.direction {
        Trend::Up => 20.0,
        Trend::Down => -20.0,
        Trend::Stable => 0.0,
    };
    let score = f64::from(NEUTRAL_FORECAST_SCORE)
        + direction
        + trend.r_squared * 15.0
        + growth.monthly.clamp(-15.0, 15.0);
    score.round().clamp(0.0, 100.0) as u8
}
