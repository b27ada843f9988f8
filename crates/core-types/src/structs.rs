use crate::enums::Polarity;
use crate::error::CoreError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single observation of a business metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

impl MetricSample {
    pub fn new(value: f64, timestamp: DateTime<Utc>) -> Self {
        Self { value, timestamp }
    }
}

/// An ordered sequence of samples.
///
/// The series is kept exactly as the caller built it. Components that depend on
/// chronological order check it with [`TimeSeries::ensure_chronological`] and
/// reject unordered input instead of sorting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries(Vec<MetricSample>);

impl TimeSeries {
    pub fn new(samples: Vec<MetricSample>) -> Self {
        Self(samples)
    }

    /// Builds a series with one sample per day starting at `start`.
    pub fn daily(start: DateTime<Utc>, values: &[f64]) -> Self {
        let samples = values
            .iter()
            .enumerate()
            .map(|(i, &value)| MetricSample::new(value, start + Duration::days(i as i64)))
            .collect();
        Self(samples)
    }

    pub fn samples(&self) -> &[MetricSample] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw values in series order.
    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|s| s.value).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricSample> {
        self.0.iter()
    }

    /// True when timestamps never decrease.
    pub fn is_chronological(&self) -> bool {
        self.0.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
    }

    pub fn ensure_chronological(&self) -> Result<(), CoreError> {
        match self
            .0
            .windows(2)
            .position(|w| w[0].timestamp > w[1].timestamp)
        {
            Some(previous) => Err(CoreError::UnorderedSeries {
                index: previous + 1,
                previous,
            }),
            None => Ok(()),
        }
    }

    pub fn ensure_finite(&self) -> Result<(), CoreError> {
        match self.0.iter().position(|s| !s.value.is_finite()) {
            Some(index) => Err(CoreError::NonFiniteValue {
                index,
                value: self.0[index].value,
            }),
            None => Ok(()),
        }
    }
}

impl From<Vec<MetricSample>> for TimeSeries {
    fn from(samples: Vec<MetricSample>) -> Self {
        Self::new(samples)
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a MetricSample;
    type IntoIter = std::slice::Iter<'a, MetricSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Four break points that map a raw metric onto a comparable 0-100 score.
///
/// Serialized as `[poor, average, good, excellent]`. A curve whose `poor`
/// threshold is larger than its `excellent` one describes a metric where lower
/// raw values are better (cost per click, response time).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 4]")]
pub struct BenchmarkCurve {
    pub poor: f64,
    pub average: f64,
    pub good: f64,
    pub excellent: f64,
}

impl BenchmarkCurve {
    pub const fn new(poor: f64, average: f64, good: f64, excellent: f64) -> Self {
        Self {
            poor,
            average,
            good,
            excellent,
        }
    }

    /// Curve used when neither the industry nor the default table knows a metric.
    pub const fn universal() -> Self {
        Self::new(0.0, 25.0, 50.0, 75.0)
    }

    /// Builds a curve from a raw threshold list. Exactly four values are required.
    pub fn from_thresholds(thresholds: &[f64]) -> Result<Self, CoreError> {
        match thresholds {
            [poor, average, good, excellent] => {
                Ok(Self::new(*poor, *average, *good, *excellent))
            }
            _ => Err(CoreError::MalformedCurve(format!(
                "expected 4 thresholds, got {}",
                thresholds.len()
            ))),
        }
    }

    pub fn polarity(&self) -> Polarity {
        if self.poor > self.excellent {
            Polarity::LowerIsBetter
        } else {
            Polarity::HigherIsBetter
        }
    }

    pub fn thresholds(&self) -> [f64; 4] {
        [self.poor, self.average, self.good, self.excellent]
    }

    /// Checks that every threshold is finite and that they move monotonically
    /// from `poor` to `excellent` in the direction given by the curve's polarity.
    /// Equal neighbours are allowed.
    pub fn validate(&self) -> Result<(), CoreError> {
        let t = self.thresholds();
        if let Some(bad) = t.iter().find(|v| !v.is_finite()) {
            return Err(CoreError::MalformedCurve(format!(
                "threshold {bad} is not finite"
            )));
        }
        let monotone = match self.polarity() {
            Polarity::HigherIsBetter => t.windows(2).all(|w| w[0] <= w[1]),
            Polarity::LowerIsBetter => t.windows(2).all(|w| w[0] >= w[1]),
        };
        if !monotone {
            return Err(CoreError::MalformedCurve(format!(
                "thresholds {t:?} are not monotone"
            )));
        }
        Ok(())
    }
}

impl TryFrom<Vec<f64>> for BenchmarkCurve {
    type Error = CoreError;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_thresholds(&value)
    }
}

impl From<BenchmarkCurve> for [f64; 4] {
    fn from(curve: BenchmarkCurve) -> Self {
        curve.thresholds()
    }
}
