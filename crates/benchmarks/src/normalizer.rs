use crate::curve::normalize;
use configuration::{AnalyticsConfig, BenchmarkTable, DEFAULT_INDUSTRY, IndustryProfiles};
use core_types::{BenchmarkCurve, Polarity};
use tracing::{debug, warn};

/// Where the curve used for a metric came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveSource {
    Override,
    Industry,
    DefaultIndustry,
    Universal,
}

/// A curve resolved for one `(industry, metric)` lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCurve {
    pub curve: BenchmarkCurve,
    pub polarity: Polarity,
    pub source: CurveSource,
}

/// Scores raw metrics against the configured benchmark table.
///
/// Lookups never fail: an unknown industry falls back to the default industry, an
/// unknown metric to the default industry's curve and then to the universal curve.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    benchmarks: BenchmarkTable,
    industries: IndustryProfiles,
}

impl Normalizer {
    pub fn new(benchmarks: BenchmarkTable, industries: IndustryProfiles) -> Self {
        Self {
            benchmarks,
            industries,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.benchmarks.clone(), config.industries.clone())
    }

    pub fn industries(&self) -> &IndustryProfiles {
        &self.industries
    }

    /// Resolves the benchmark industry for a free-form business category: lower-cased,
    /// followed through the alias table, and replaced by the default industry when the
    /// table has no curves for it.
    pub fn resolve_industry(&self, raw: &str) -> String {
        let industry = self.industries.canonical(raw);
        if self.benchmarks.contains_industry(&industry) {
            industry
        } else {
            debug!(industry = %raw, "No benchmark table for industry, using default");
            DEFAULT_INDUSTRY.to_string()
        }
    }

    /// Finds the curve for a metric, honouring a caller-supplied override.
    ///
    /// The override must hold exactly four finite thresholds that move monotonically in
    /// the direction of the configured curve; anything else is logged and ignored.
    pub fn resolve(
        &self,
        industry: &str,
        metric: &str,
        override_thresholds: Option<&[f64]>,
    ) -> ResolvedCurve {
        let base = self.configured_curve(industry, metric);

        if let Some(thresholds) = override_thresholds {
            match validate_override(thresholds, base.polarity) {
                Some(curve) => {
                    return ResolvedCurve {
                        curve,
                        polarity: base.polarity,
                        source: CurveSource::Override,
                    };
                }
                None => warn!(
                    metric,
                    ?thresholds,
                    "Ignoring malformed benchmark override"
                ),
            }
        }
        base
    }

    /// Scores `value` on 0-100 for the given industry and metric.
    pub fn normalize(
        &self,
        value: f64,
        industry: &str,
        metric: &str,
        override_thresholds: Option<&[f64]>,
    ) -> u8 {
        let resolved = self.resolve(industry, metric, override_thresholds);
        normalize(value, &resolved.curve, resolved.polarity)
    }

    fn configured_curve(&self, industry: &str, metric: &str) -> ResolvedCurve {
        let industry = self.resolve_industry(industry);

        if let Some(curve) = self.benchmarks.curve(&industry, metric) {
            let source = if industry == DEFAULT_INDUSTRY {
                CurveSource::DefaultIndustry
            } else {
                CurveSource::Industry
            };
            return resolved(*curve, source);
        }
        if let Some(curve) = self.benchmarks.curve(DEFAULT_INDUSTRY, metric) {
            debug!(%industry, metric, "Metric missing from industry table, using default curve");
            return resolved(*curve, CurveSource::DefaultIndustry);
        }
        debug!(%industry, metric, "No benchmark curve for metric, using universal curve");
        resolved(BenchmarkCurve::universal(), CurveSource::Universal)
    }
}

fn resolved(curve: BenchmarkCurve, source: CurveSource) -> ResolvedCurve {
    ResolvedCurve {
        curve,
        polarity: curve.polarity(),
        source,
    }
}

fn validate_override(thresholds: &[f64], polarity: Polarity) -> Option<BenchmarkCurve> {
    let curve = BenchmarkCurve::from_thresholds(thresholds).ok()?;
    let t = curve.thresholds();
    if t.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let monotone = match polarity {
        Polarity::HigherIsBetter => t.windows(2).all(|w| w[0] <= w[1]),
        Polarity::LowerIsBetter => t.windows(2).all(|w| w[0] >= w[1]),
    };
    monotone.then_some(curve)
}
