use crate::error::AnalyticsError;
use crate::snapshot::SnapshotKey;
use anomaly::{AnomalyDetector, AnomalyOverview, DetectionReport};
use configuration::{AnalyticsConfig, AnomalySettings};
use core_types::TimeSeries;
use forecasting::{ForecastReport, Forecaster};
use scoring::{Aggregator, CategoryScore, ScoreComponent, Scorecard};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// The single entry point into the analytics core.
///
/// Built once from a validated [`AnalyticsConfig`]. Every operation is a pure
/// calculation over its arguments, and the engine is cheap to clone: clones share the
/// same read-only components.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    aggregator: Arc<Aggregator>,
    detector: Arc<AnomalyDetector>,
    forecaster: Arc<Forecaster>,
}

impl AnalyticsEngine {
    pub fn new(config: &AnalyticsConfig) -> Result<Self, AnalyticsError> {
        config.validate()?;
        let engine = Self {
            aggregator: Arc::new(Aggregator::from_config(config)),
            detector: Arc::new(AnomalyDetector::new(config.anomaly.clone())?),
            forecaster: Arc::new(Forecaster::new(config.forecasting.clone())?),
        };
        info!(
            industries = config.benchmarks.industries().count(),
            categories = config.scoring.categories.len(),
            "Analytics engine ready"
        );
        Ok(engine)
    }

    /// Loads `config.toml` from the given path and builds the engine from it.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, AnalyticsError> {
        let config = configuration::load_config_from_path(path)?;
        Self::new(&config)
    }

    // --- Scoring ---

    /// Scores a raw metric on 0-100 against the industry's benchmark curve.
    pub fn normalize(
        &self,
        value: f64,
        industry: &str,
        metric: &str,
        override_thresholds: Option<&[f64]>,
    ) -> u8 {
        self.aggregator
            .normalizer()
            .normalize(value, industry, metric, override_thresholds)
    }

    pub fn aggregate_category(&self, components: &[ScoreComponent]) -> u8 {
        self.aggregator.aggregate_category(components)
    }

    pub fn aggregate_overall(
        &self,
        categories: &[CategoryScore],
        modifiers: Option<&HashMap<String, f64>>,
    ) -> u8 {
        self.aggregator.aggregate_overall(categories, modifiers)
    }

    pub fn modifiers_for(&self, industry: &str) -> HashMap<String, f64> {
        self.aggregator.modifiers_for(industry)
    }

    /// Normalizes and aggregates the raw metrics of one scoring category.
    pub fn score_category(
        &self,
        industry: &str,
        category: &str,
        raw_metrics: &BTreeMap<String, f64>,
        overrides: &HashMap<String, Vec<f64>>,
    ) -> CategoryScore {
        self.aggregator
            .score_category(industry, category, raw_metrics, overrides)
    }

    pub fn scorecard(&self, industry: &str, categories: &[CategoryScore]) -> Scorecard {
        self.aggregator.scorecard(industry, categories)
    }

    // --- Time series ---

    pub fn detect(&self, series: &TimeSeries) -> Result<DetectionReport, AnalyticsError> {
        Ok(self.detector.detect(series)?)
    }

    /// Detects anomalies with `options` in place of the configured thresholds.
    pub fn detect_with(
        &self,
        series: &TimeSeries,
        options: Option<&AnomalySettings>,
    ) -> Result<DetectionReport, AnalyticsError> {
        Ok(self.detector.detect_with(series, options)?)
    }

    pub fn detect_many(
        &self,
        metrics: &BTreeMap<String, TimeSeries>,
    ) -> Result<AnomalyOverview, AnalyticsError> {
        Ok(self.detector.detect_many(metrics)?)
    }

    pub fn forecast(&self, series: &TimeSeries) -> Result<ForecastReport, AnalyticsError> {
        Ok(self.forecaster.forecast(series)?)
    }

    /// Cache key for a snapshot computed from `inputs` for one business.
    ///
    /// The engine itself never caches; callers use the key to memoize results.
    pub fn snapshot_key<T: Serialize + ?Sized>(
        &self,
        business_id: &str,
        inputs: &T,
    ) -> Result<SnapshotKey, AnalyticsError> {
        Ok(SnapshotKey::of(business_id, inputs)?)
    }
}
