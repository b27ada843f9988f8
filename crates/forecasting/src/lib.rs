//! # Pulse Revenue Forecasting Ensemble
//!
//! Projects daily revenue over 7, 30, 60 and 90 days by blending four classical
//! models with fixed weights:
//!
//! | Model | Point forecast |
//! |---|---|
//! | Linear regression | fitted line one day past the history |
//! | Exponential smoothing | last smoothed level |
//! | Weighted moving average | most recent weighted window |
//! | Holt (double exponential smoothing) | level plus one step of trend |
//!
//! The blend is extrapolated with the week-over-week growth rate, compounding to
//! the middle of each horizon. Confidence bands are fixed per horizon; the
//! consistency of the history is summarised separately by its coefficient of
//! variation. Each model also scores itself on the last week of history, after
//! refitting on the days before it. Those scores are reported but never fed back
//! into the blend weights.
//!
//! Models are refitted from scratch on every call and hold no state between calls.

pub mod accuracy;
pub mod error;
pub mod forecaster;
pub mod growth;
pub mod indicators;
pub mod models;
pub mod projection;
pub mod risk;
pub mod seasonality;

pub use accuracy::{AccuracyReport, ModelAccuracy, blend, holdout_accuracy};
pub use error::ForecastError;
pub use forecaster::{ForecastReport, Forecaster};
pub use growth::{GrowthRate, growth_rate};
pub use indicators::{ConfidenceSummary, CurrentMetrics, TrendStrength, TrendSummary};
pub use models::{
    ExponentialSmoothingModel, ForecastModel, HoltModel, HoltState, LinearTrendModel, ModelKind,
    WeightedAverageModel, standard_models,
};
pub use projection::{ConfidenceInterval, ForecastResult, project, project_all};
pub use risk::{RiskAssessment, RiskFactor, RiskLevel, assess_risk, forecast_score};
pub use seasonality::{Seasonality, WeekdayAverage};
