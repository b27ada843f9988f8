use configuration::{EnsembleWeights, ForecastSettings};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statistics::{exponential_smoothing, linear_regression, weighted_moving_average};
use std::fmt;

/// The four models blended by the ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Linear,
    ExpSmoothing,
    MovingAvg,
    HoltWinters,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Linear,
        ModelKind::ExpSmoothing,
        ModelKind::MovingAvg,
        ModelKind::HoltWinters,
    ];

    /// Blend weight of this model.
    pub fn weight(self, weights: &EnsembleWeights) -> Decimal {
        match self {
            ModelKind::Linear => weights.linear,
            ModelKind::ExpSmoothing => weights.exp_smoothing,
            ModelKind::MovingAvg => weights.moving_avg,
            ModelKind::HoltWinters => weights.holt_winters,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelKind::Linear => "linear",
            ModelKind::ExpSmoothing => "exp_smoothing",
            ModelKind::MovingAvg => "moving_avg",
            ModelKind::HoltWinters => "holt_winters",
        };
        f.write_str(name)
    }
}

/// A forecasting model that is fitted from scratch on every call.
///
/// Models hold only their constants, never fitted state, so the same instance can
/// score the full history and a hold-out training prefix.
pub trait ForecastModel: Send + Sync {
    fn kind(&self) -> ModelKind;

    /// Fits the model to `history` and returns its forecast for the next day.
    /// An empty history forecasts 0.
    fn point_forecast(&self, history: &[f64]) -> f64;
}

/// Least-squares line over the day index, evaluated one step past the history.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearTrendModel;

impl ForecastModel for LinearTrendModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Linear
    }

    fn point_forecast(&self, history: &[f64]) -> f64 {
        linear_regression(history).predict(history.len() as f64)
    }
}

/// Single exponential smoothing; the forecast is the last smoothed level.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialSmoothingModel {
    pub alpha: f64,
}

impl ForecastModel for ExponentialSmoothingModel {
    fn kind(&self) -> ModelKind {
        ModelKind::ExpSmoothing
    }

    fn point_forecast(&self, history: &[f64]) -> f64 {
        exponential_smoothing(history, self.alpha)
            .last()
            .copied()
            .unwrap_or(0.0)
    }
}

/// Linearly weighted moving average; the forecast is the most recent window.
#[derive(Debug, Clone, Copy)]
pub struct WeightedAverageModel {
    pub period: usize,
}

impl ForecastModel for WeightedAverageModel {
    fn kind(&self) -> ModelKind {
        ModelKind::MovingAvg
    }

    fn point_forecast(&self, history: &[f64]) -> f64 {
        weighted_moving_average(history, self.period)
            .last()
            .copied()
            .unwrap_or(0.0)
    }
}

/// Level and trend after running the Holt recursion over a history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoltState {
    pub level: f64,
    pub trend: f64,
}

impl HoltState {
    pub fn forecast(&self, steps: f64) -> f64 {
        self.level + self.trend * steps
    }
}

/// Holt's double exponential smoothing (level and trend, no seasonal term).
#[derive(Debug, Clone, Copy)]
pub struct HoltModel {
    pub alpha: f64,
    pub beta: f64,
}

impl HoltModel {
    /// Runs the recursion with `level_0 = x_0` and `trend_0 = x_1 - x_0`.
    pub fn fit(&self, history: &[f64]) -> Option<HoltState> {
        let (&first, rest) = history.split_first()?;
        let mut state = HoltState {
            level: first,
            trend: rest.first().map_or(0.0, |&second| second - first),
        };
        for &x in rest {
            let previous = state.level;
            state.level = self.alpha * x + (1.0 - self.alpha) * (state.level + state.trend);
            state.trend = self.beta * (state.level - previous) + (1.0 - self.beta) * state.trend;
        }
        Some(state)
    }
}

impl ForecastModel for HoltModel {
    fn kind(&self) -> ModelKind {
        ModelKind::HoltWinters
    }

    fn point_forecast(&self, history: &[f64]) -> f64 {
        self.fit(history).map_or(0.0, |s| s.forecast(1.0))
    }
}

/// The four ensemble models configured from settings, in blend order.
pub fn standard_models(settings: &ForecastSettings) -> Vec<Box<dyn ForecastModel>> {
    vec![
        Box::new(LinearTrendModel),
        Box::new(ExponentialSmoothingModel {
            alpha: settings.smoothing_alpha,
        }),
        Box::new(WeightedAverageModel {
            period: settings.moving_average_period,
        }),
        Box::new(HoltModel {
            alpha: settings.holt_alpha,
            beta: settings.holt_beta,
        }),
    ]
}
