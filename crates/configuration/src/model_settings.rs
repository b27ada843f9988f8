use crate::error::ConfigError;
use core_types::Horizon;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Thresholds for the anomaly detection ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalySettings {
    /// Series shorter than this are reported as insufficient data.
    pub min_data_points: usize,

    // Z-score bands (inclusive lower bounds).
    pub z_critical: f64,
    pub z_warning: f64,
    pub z_notable: f64,

    /// Tukey fence multiplier.
    pub iqr_multiplier: f64,

    // Control chart limits, in standard deviations from the mean.
    pub spc_control_sigma: f64,
    pub spc_warning_sigma: f64,

    /// Upper bound on the rolling window length.
    pub moving_average_window: usize,
    /// The rolling detector is skipped when the window would be shorter than this.
    pub moving_average_min_window: usize,
    /// Deviation from the local mean, in local standard deviations, that flags a point.
    pub moving_average_threshold: f64,

    /// Weights of the 0-100 anomaly score.
    pub score: AnomalyScoreWeights,
}

/// Points contributed to the anomaly score per deduplicated anomaly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyScoreWeights {
    pub per_critical: u32,
    pub per_warning: u32,
    pub per_anomaly: u32,
}

/// Constants of the revenue forecasting ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastSettings {
    /// Series shorter than this produce an insufficient-data result.
    pub min_data_points: usize,
    /// Alpha of single exponential smoothing.
    pub smoothing_alpha: f64,
    /// Level smoothing of the Holt model.
    pub holt_alpha: f64,
    /// Trend smoothing of the Holt model.
    pub holt_beta: f64,
    /// Window of the weighted moving average.
    pub moving_average_period: usize,
    /// Number of trailing points held out when scoring model accuracy.
    pub holdout: usize,
    /// Length of the trailing and prior windows compared for growth.
    pub growth_window: usize,
    pub weights: EnsembleWeights,
    pub bands: ConfidenceBands,
    /// Coefficient of variation (percent) below which history is "high" confidence.
    pub cv_high: f64,
    /// Coefficient of variation (percent) below which history is "medium" confidence.
    pub cv_medium: f64,
}

/// Blend weights of the four forecasting models. Must sum to exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    pub linear: Decimal,
    pub exp_smoothing: Decimal,
    pub moving_avg: Decimal,
    pub holt_winters: Decimal,
}

/// Half-width of the forecast band for each horizon, as a fraction of the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceBands {
    pub week: f64,
    pub month: f64,
    pub two_months: f64,
    pub quarter: f64,
}

impl AnomalySettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_data_points < 2 {
            return Err(invalid("anomaly.min_data_points must be at least 2"));
        }
        if !(self.z_critical >= self.z_warning && self.z_warning >= self.z_notable && self.z_notable > 0.0) {
            return Err(invalid(
                "anomaly z-score thresholds must satisfy z_critical >= z_warning >= z_notable > 0",
            ));
        }
        if !(self.spc_control_sigma >= self.spc_warning_sigma && self.spc_warning_sigma > 0.0) {
            return Err(invalid(
                "anomaly SPC limits must satisfy spc_control_sigma >= spc_warning_sigma > 0",
            ));
        }
        if !(self.iqr_multiplier.is_finite() && self.iqr_multiplier > 0.0) {
            return Err(invalid("anomaly.iqr_multiplier must be positive"));
        }
        if self.moving_average_min_window < 2 || self.moving_average_window < self.moving_average_min_window {
            return Err(invalid(
                "anomaly moving average windows must satisfy moving_average_window >= moving_average_min_window >= 2",
            ));
        }
        if !(self.moving_average_threshold.is_finite() && self.moving_average_threshold > 0.0) {
            return Err(invalid("anomaly.moving_average_threshold must be positive"));
        }
        Ok(())
    }
}

impl ForecastSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_data_points < 2 {
            return Err(invalid("forecasting.min_data_points must be at least 2"));
        }
        for (key, value) in [
            ("smoothing_alpha", self.smoothing_alpha),
            ("holt_alpha", self.holt_alpha),
            ("holt_beta", self.holt_beta),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::ValidationError(format!(
                    "forecasting.{key} must be within (0, 1], got {value}"
                )));
            }
        }
        if self.moving_average_period == 0 || self.holdout == 0 || self.growth_window == 0 {
            return Err(invalid(
                "forecasting moving_average_period, holdout and growth_window must be positive",
            ));
        }
        if !(self.cv_high > 0.0 && self.cv_medium >= self.cv_high) {
            return Err(invalid("forecasting thresholds must satisfy cv_medium >= cv_high > 0"));
        }
        self.weights.validate()?;
        self.bands.validate()?;
        Ok(())
    }
}

impl EnsembleWeights {
    pub fn total(&self) -> Decimal {
        self.linear + self.exp_smoothing + self.moving_avg + self.holt_winters
    }

    /// Each weight must be non-negative and all four must add up to exactly one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [self.linear, self.exp_smoothing, self.moving_avg, self.holt_winters];
        if all.iter().any(|w| w.is_sign_negative() && !w.is_zero()) {
            return Err(invalid("forecasting.weights must be non-negative"));
        }
        let total = self.total();
        if total != Decimal::ONE {
            return Err(ConfigError::ValidationError(format!(
                "forecasting.weights must sum to 1.0, got {total}"
            )));
        }
        Ok(())
    }
}

impl ConfidenceBands {
    pub fn for_horizon(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::Week => self.week,
            Horizon::Month => self.month,
            Horizon::TwoMonths => self.two_months,
            Horizon::Quarter => self.quarter,
        }
    }

    /// Bands must lie in [0, 1) and never narrow as the horizon grows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let widths = Horizon::ALL.map(|h| self.for_horizon(h));
        if widths.iter().any(|w| !(*w >= 0.0 && *w < 1.0)) {
            return Err(invalid("forecasting.bands must lie within [0, 1)"));
        }
        if widths.windows(2).any(|w| w[0] > w[1]) {
            return Err(invalid("forecasting.bands must widen with the horizon"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError(message.to_string())
}

// --- Default Implementations ---
// These are the values the ensembles were tuned with; `config.toml` only needs to
// mention the ones it changes.

impl Default for AnomalySettings {
    fn default() -> Self {
        Self {
            min_data_points: 10,
            z_critical: 3.0,
            z_warning: 2.0,
            z_notable: 1.5,
            iqr_multiplier: 1.5,
            spc_control_sigma: 3.0,
            spc_warning_sigma: 2.0,
            moving_average_window: 7,
            moving_average_min_window: 3,
            moving_average_threshold: 2.5,
            score: AnomalyScoreWeights::default(),
        }
    }
}

impl Default for AnomalyScoreWeights {
    fn default() -> Self {
        Self {
            per_critical: 10,
            per_warning: 5,
            per_anomaly: 2,
        }
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            min_data_points: 7,
            smoothing_alpha: 0.3,
            holt_alpha: 0.3,
            holt_beta: 0.1,
            moving_average_period: 7,
            holdout: 7,
            growth_window: 7,
            weights: EnsembleWeights::default(),
            bands: ConfidenceBands::default(),
            cv_high: 20.0,
            cv_medium: 40.0,
        }
    }
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            linear: dec!(0.25),
            exp_smoothing: dec!(0.30),
            moving_avg: dec!(0.20),
            holt_winters: dec!(0.25),
        }
    }
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self {
            week: 0.15,
            month: 0.20,
            two_months: 0.225,
            quarter: 0.25,
        }
    }
}
