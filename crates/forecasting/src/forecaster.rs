use crate::accuracy::{AccuracyReport, blend, holdout_accuracy};
use crate::error::ForecastError;
use crate::growth::{GrowthRate, growth_rate};
use crate::indicators::{ConfidenceSummary, CurrentMetrics, TrendSummary};
use crate::models::{ForecastModel, ModelKind, standard_models};
use crate::projection::{ForecastResult, project_all};
use crate::risk::{NEUTRAL_FORECAST_SCORE, RiskAssessment, assess_risk, forecast_score};
use crate::seasonality::Seasonality;
use configuration::ForecastSettings;
use core_types::TimeSeries;
use serde::{Deserialize, Serialize};
use statistics::linear_regression;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Everything the ensemble says about one revenue history.
///
/// When `insufficient_data` is set, no numeric claim is made: the score is the
/// neutral 50 and every other section is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub score: u8,
    pub insufficient_data: bool,
    pub data_points: usize,
    pub trend: Option<TrendSummary>,
    pub growth_rate: Option<GrowthRate>,
    pub current_metrics: Option<CurrentMetrics>,
    pub seasonality: Option<Seasonality>,
    /// Next-day forecast of each model fitted on the full history.
    pub model_forecasts: BTreeMap<ModelKind, f64>,
    pub blended_daily: Option<f64>,
    /// One entry per horizon, shortest first.
    pub forecasts: Vec<ForecastResult>,
    pub confidence: Option<ConfidenceSummary>,
    pub model_accuracy: Option<AccuracyReport>,
    pub risk: Option<RiskAssessment>,
}

impl ForecastReport {
    pub fn insufficient(data_points: usize) -> Self {
        Self {
            score: NEUTRAL_FORECAST_SCORE,
            insufficient_data: true,
            data_points,
            trend: None,
            growth_rate: None,
            current_metrics: None,
            seasonality: None,
            model_forecasts: BTreeMap::new(),
            blended_daily: None,
            forecasts: Vec::new(),
            confidence: None,
            model_accuracy: None,
            risk: None,
        }
    }
}

/// Blends the four forecasting models over a daily revenue series.
pub struct Forecaster {
    settings: ForecastSettings,
    models: Vec<Box<dyn ForecastModel>>,
}

impl Forecaster {
    /// Builds the standard ensemble. Fails when the settings are invalid, in
    /// particular when the blend weights do not sum to exactly one.
    pub fn new(settings: ForecastSettings) -> Result<Self, ForecastError> {
        settings
            .validate()
            .map_err(|e| ForecastError::InvalidSettings(e.to_string()))?;
        let models = standard_models(&settings);
        Ok(Self { settings, models })
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    /// Forecasts revenue for the 7, 30, 60 and 90 day horizons.
    ///
    /// The series must be chronological and finite. One shorter than the configured
    /// minimum yields an insufficient-data report rather than an error.
    #[tracing::instrument(skip(self, series), fields(points = series.len()))]
    pub fn forecast(&self, series: &TimeSeries) -> Result<ForecastReport, ForecastError> {
        series.ensure_chronological()?;
        series.ensure_finite()?;

        if series.len() < self.settings.min_data_points {
            debug!(
                required = self.settings.min_data_points,
                "Series too short to forecast"
            );
            return Ok(ForecastReport::insufficient(series.len()));
        }

        let values = series.values();
        let fit = linear_regression(&values);
        let trend = TrendSummary::from(&fit);
        let growth = growth_rate(&values, self.settings.growth_window);

        let (model_forecasts, blended) = blend(&self.models, &self.settings.weights, &values);
        for (kind, forecast) in &model_forecasts {
            debug!(model = %kind, forecast, "Model fitted");
        }

        let forecasts = project_all(blended, &growth, &self.settings.bands);
        let confidence = ConfidenceSummary::from_values(&values, &self.settings);
        let accuracy = holdout_accuracy(
            &self.models,
            &self.settings.weights,
            &values,
            self.settings.holdout,
        );
        let risk = assess_risk(&trend, &growth, &confidence, self.settings.cv_medium);
        let score = forecast_score(&trend, &growth);

        info!(
            blended,
            score,
            trend = ?trend.direction,
            risk = ?risk.level,
            "Forecast complete"
        );

        Ok(ForecastReport {
            score,
            insufficient_data: false,
            data_points: series.len(),
            trend: Some(trend),
            growth_rate: Some(growth),
            current_metrics: Some(CurrentMetrics::from_values(&values)),
            seasonality: Some(Seasonality::from_samples(series.samples())),
            model_forecasts,
            blended_daily: Some(blended),
            forecasts,
            confidence: Some(confidence),
            model_accuracy: Some(accuracy),
            risk: Some(risk),
        })
    }
}

impl std::fmt::Debug for Forecaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forecaster")
            .field("settings", &self.settings)
            .field(
                "models",
                &self.models.iter().map(|m| m.kind()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use configuration::EnsembleWeights;
    use core_types::{CoreError, Horizon, MetricSample};
    use rust_decimal_macros::dec;

    fn start() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
    }

    fn forecaster() -> Forecaster {
        Forecaster::new(ForecastSettings::default()).unwrap()
    }

    #[test]
    fn five_points_make_no_claims() {
        let series = TimeSeries::daily(start(), &[100.0, 110.0, 120.0, 130.0, 140.0]);
        let report = forecaster().forecast(&series).unwrap();
        assert!(report.insufficient_data);
        assert_eq!(report.score, 50);
        assert!(report.forecasts.is_empty());
        assert!(report.model_forecasts.is_empty());
        assert!(report.blended_daily.is_none());
        assert!(report.model_accuracy.is_none());
    }

    #[test]
    fn weights_off_by_a_hair_are_refused() {
        let settings = ForecastSettings {
            weights: EnsembleWeights {
                linear: dec!(0.25),
                exp_smoothing: dec!(0.30),
                moving_avg: dec!(0.20),
                holt_winters: dec!(0.2500001),
            },
            ..ForecastSettings::default()
        };
        assert!(matches!(
            Forecaster::new(settings),
            Err(ForecastError::InvalidSettings(_))
        ));
    }

    #[test]
    fn flat_week_forecasts_itself() {
        let series = TimeSeries::daily(start(), &[1000.0; 7]);
        let report = forecaster().forecast(&series).unwrap();
        assert!(!report.insufficient_data);
        assert_eq!(report.forecasts.len(), 4);
        assert_eq!(report.forecasts[0].horizon, Horizon::Week);
        assert_eq!(report.forecasts[0].total, 7000);
        assert_eq!(report.forecasts[3].total, 90_000);

        // n < 14: accuracy cannot be scored
        let accuracy = report.model_accuracy.unwrap();
        assert!(accuracy.insufficient_data);
        assert!(accuracy.models.is_empty());
    }

    #[test]
    fn rising_history_is_scored_up() {
        let values: Vec<f64> = (0..28).map(|i| 1000.0 + 20.0 * f64::from(i)).collect();
        let report = forecaster()
            .forecast(&TimeSeries::daily(start(), &values))
            .unwrap();
        let trend = report.trend.unwrap();
        assert_eq!(trend.direction, core_types::Trend::Up);
        assert!(report.growth_rate.unwrap().daily > 0.0);
        assert!(report.score > 70);
        assert!(report.model_accuracy.unwrap().ensemble.is_some());

        let week = &report.forecasts[0];
        assert!(week.interval.lower < week.total && week.total < week.interval.upper);
        // compounding never shrinks a growing forecast
        assert!(report.forecasts[3].per_day >= report.forecasts[0].per_day);
    }

    #[test]
    fn unordered_series_is_rejected() {
        let t0 = start();
        let mut samples: Vec<MetricSample> = (0..10)
            .map(|i| MetricSample::new(50.0, t0 + Duration::days(i)))
            .collect();
        samples.swap(0, 9);
        let err = forecaster().forecast(&TimeSeries::new(samples)).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InvalidSeries(CoreError::UnorderedSeries { .. })
        ));
    }
}
