use crate::error::ConfigError;
use crate::model_settings::{AnomalySettings, ForecastSettings};
use core_types::BenchmarkCurve;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Name of the industry whose benchmark table backs every other industry.
pub const DEFAULT_INDUSTRY: &str = "default";

/// The root configuration structure for the analytics core.
///
/// Every section may be omitted from `config.toml`; the defaults still produce a
/// working (if generic) configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub benchmarks: BenchmarkTable,
    pub industries: IndustryProfiles,
    pub scoring: ScoringSettings,
    pub anomaly: AnomalySettings,
    pub forecasting: ForecastSettings,
}

impl AnalyticsConfig {
    /// Checks every section. Called by the loaders after deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.benchmarks.validate()?;
        self.industries.validate()?;
        self.scoring.validate()?;
        self.anomaly.validate()?;
        self.forecasting.validate()?;
        Ok(())
    }
}

/// `(industry, metric) -> curve` lookup table.
///
/// In TOML each industry is a table of metric arrays:
///
/// ```toml
/// [benchmarks.default]
/// engagement_rate = [0.5, 1.5, 3.0, 6.0]
/// cpc = [15000, 8000, 4000, 2000]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable {
    industries: HashMap<String, HashMap<String, BenchmarkCurve>>,
}

impl BenchmarkTable {
    pub fn new(industries: HashMap<String, HashMap<String, BenchmarkCurve>>) -> Self {
        Self { industries }
    }

    /// Adds or replaces a single curve.
    pub fn insert(&mut self, industry: &str, metric: &str, curve: BenchmarkCurve) {
        self.industries
            .entry(industry.to_string())
            .or_default()
            .insert(metric.to_string(), curve);
    }

    pub fn contains_industry(&self, industry: &str) -> bool {
        self.industries.contains_key(industry)
    }

    /// Exact lookup without any fallback.
    pub fn curve(&self, industry: &str, metric: &str) -> Option<&BenchmarkCurve> {
        self.industries.get(industry)?.get(metric)
    }

    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.industries.keys().map(String::as_str)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (industry, metrics) in &self.industries {
            for (metric, curve) in metrics {
                curve.validate().map_err(|e| {
                    ConfigError::ValidationError(format!(
                        "benchmark '{industry}.{metric}': {e}"
                    ))
                })?;
            }
        }
        Ok(())
    }
}

/// Per-industry knobs that are not benchmark curves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndustryProfiles {
    /// Maps common business categories onto a benchmark industry
    /// (e.g. `cafe -> food`).
    pub aliases: HashMap<String, String>,
    /// Multiplicative category adjustments, e.g. `food.content = 1.2`.
    pub modifiers: HashMap<String, HashMap<String, f64>>,
    /// Typical overall score of a business in the industry.
    pub averages: HashMap<String, u8>,
}

impl IndustryProfiles {
    /// Lower-cases the raw industry and follows the alias table once.
    pub fn canonical(&self, raw: &str) -> String {
        let key = raw.trim().to_lowercase();
        match self.aliases.get(&key) {
            Some(target) => target.clone(),
            None => key,
        }
    }

    /// Category modifiers for an industry. Unknown industries have none.
    pub fn modifiers_for(&self, industry: &str) -> HashMap<String, f64> {
        self.modifiers
            .get(&self.canonical(industry))
            .cloned()
            .unwrap_or_default()
    }

    /// Industry average score, falling back to the default industry and then to 50.
    pub fn average_for(&self, industry: &str) -> u8 {
        self.averages
            .get(&self.canonical(industry))
            .or_else(|| self.averages.get(DEFAULT_INDUSTRY))
            .copied()
            .unwrap_or(50)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (industry, mods) in &self.modifiers {
            for (category, factor) in mods {
                if !factor.is_finite() || *factor <= 0.0 {
                    return Err(ConfigError::ValidationError(format!(
                        "modifier '{industry}.{category}' must be a positive number, got {factor}"
                    )));
                }
            }
        }
        if let Some((industry, avg)) = self.averages.iter().find(|(_, v)| **v > 100) {
            return Err(ConfigError::ValidationError(format!(
                "industry average for '{industry}' must be within 0..=100, got {avg}"
            )));
        }
        Ok(())
    }
}

impl Default for IndustryProfiles {
    fn default() -> Self {
        Self {
            aliases: HashMap::new(),
            modifiers: HashMap::new(),
            averages: HashMap::from([(DEFAULT_INDUSTRY.to_string(), 50)]),
        }
    }
}

/// Category and metric weights used by the aggregator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub categories: BTreeMap<String, CategorySettings>,
}

/// A category's weight in the overall score and the relative weights of its metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySettings {
    pub weight: f64,
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

impl ScoringSettings {
    pub fn category(&self, name: &str) -> Option<&CategorySettings> {
        self.categories.get(name)
    }

    /// Weight of a category in the overall score; unknown categories weigh 0.
    pub fn category_weight(&self, name: &str) -> f64 {
        self.categories.get(name).map(|c| c.weight).unwrap_or(0.0)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, category) in &self.categories {
            check_weight(&format!("scoring.categories.{name}.weight"), category.weight)?;
            for (metric, weight) in &category.metrics {
                check_weight(&format!("scoring.categories.{name}.metrics.{metric}"), *weight)?;
            }
        }
        Ok(())
    }
}

fn check_weight(key: &str, weight: f64) -> Result<(), ConfigError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(format!(
            "{key} must be a non-negative number, got {weight}"
        )))
    }
}
