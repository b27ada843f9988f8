use crate::components::{
    CategoryScore, ScoreComponent, apply_modifiers, weighted_average, weighted_overall_score,
};
use crate::scorecard::{
    IndustryComparison, ScoreStatus, Scorecard, improvement_potential, strongest, weakest,
};
use benchmarks::Normalizer;
use configuration::{AnalyticsConfig, ScoringSettings};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Combines normalized metrics into category scores and categories into an overall
/// score, using the configured weights and industry modifiers.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    settings: ScoringSettings,
    normalizer: Normalizer,
}

impl Aggregator {
    pub fn new(settings: ScoringSettings, normalizer: Normalizer) -> Self {
        Self {
            settings,
            normalizer,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.scoring.clone(), Normalizer::from_config(config))
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn aggregate_category(&self, components: &[ScoreComponent]) -> u8 {
        weighted_average(components)
    }

    /// Overall score of the given categories. Without explicit modifiers every
    /// category counts at face value.
    pub fn aggregate_overall(
        &self,
        categories: &[CategoryScore],
        modifiers: Option<&HashMap<String, f64>>,
    ) -> u8 {
        let none = HashMap::new();
        weighted_overall_score(categories, modifiers.unwrap_or(&none))
    }

    /// The configured category modifiers for an industry (after alias resolution).
    pub fn modifiers_for(&self, industry: &str) -> HashMap<String, f64> {
        self.normalizer.industries().modifiers_for(industry)
    }

    /// Normalizes each raw metric of a category and pairs it with its configured
    /// weight. Metrics the category does not weight are left out.
    pub fn category_components(
        &self,
        industry: &str,
        category: &str,
        raw_metrics: &BTreeMap<String, f64>,
        overrides: &HashMap<String, Vec<f64>>,
    ) -> Vec<ScoreComponent> {
        let Some(settings) = self.settings.category(category) else {
            debug!(category, "Unknown scoring category, no components scored");
            return Vec::new();
        };

        raw_metrics
            .iter()
            .filter_map(|(metric, value)| {
                let Some(weight) = settings.metrics.get(metric) else {
                    debug!(category, %metric, "Metric has no weight in category, skipped");
                    return None;
                };
                let override_thresholds = overrides.get(metric).map(Vec::as_slice);
                let score = self
                    .normalizer
                    .normalize(*value, industry, metric, override_thresholds);
                Some(ScoreComponent::new(metric.clone(), score, *weight))
            })
            .collect()
    }

    /// Scores one category from raw metric values.
    pub fn score_category(
        &self,
        industry: &str,
        category: &str,
        raw_metrics: &BTreeMap<String, f64>,
        overrides: &HashMap<String, Vec<f64>>,
    ) -> CategoryScore {
        let components = self.category_components(industry, category, raw_metrics, overrides);
        let score = weighted_average(&components);
        CategoryScore::new(category, score, self.settings.category_weight(category))
    }

    /// Builds the health scorecard for a set of category scores.
    pub fn scorecard(&self, industry: &str, categories: &[CategoryScore]) -> Scorecard {
        let industry = self.normalizer.industries().canonical(industry);
        let adjusted = apply_modifiers(categories, &self.modifiers_for(&industry));
        let overall = weighted_overall_score(&adjusted, &HashMap::new());
        let industry_average = self.normalizer.industries().average_for(&industry);

        Scorecard {
            overall,
            status: ScoreStatus::from_score(overall),
            weakest: weakest(&adjusted).cloned(),
            strongest: strongest(&adjusted).cloned(),
            total_potential: 100 - overall,
            improvement: improvement_potential(&adjusted),
            industry_comparison: IndustryComparison::new(industry, overall, industry_average),
            categories: adjusted,
        }
    }
}
