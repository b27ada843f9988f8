use serde::{Deserialize, Serialize};

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (divisor `n - 1`). Zero when fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Sample standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Population variance (divisor `n`). Zero for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// The `p`-th percentile (0-100) with linear interpolation between ranks.
///
/// Sorts a copy of the input. `p` is clamped to `[0, 100]`. Zero for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, p)
}

/// Same as [`percentile`] for input that is already sorted ascending.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let p = if p.is_nan() { 50.0 } else { p.clamp(0.0, 100.0) };
    let index = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = index - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

pub fn median(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// Sample coefficient of variation in percent. Zero when the mean is not positive.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if m <= 0.0 {
        return 0.0;
    }
    std_dev(values) / m * 100.0
}

/// Maps `value` from `[min, max]` onto `[0, 100]`, clamped.
///
/// A degenerate range (`max <= min`, or non-finite bounds) maps to the midpoint 50.
pub fn min_max_scale(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 || !value.is_finite() {
        return 50.0;
    }
    ((value - min) / range * 100.0).clamp(0.0, 100.0)
}

/// Mean absolute percentage error, in percent, over the pairs whose actual value is
/// positive. `None` when no such pair exists.
pub fn mean_absolute_percentage_error(actuals: &[f64], predicted: &[f64]) -> Option<f64> {
    let errors: Vec<f64> = actuals
        .iter()
        .zip(predicted)
        .filter(|(actual, _)| **actual > 0.0)
        .map(|(actual, forecast)| ((actual - forecast) / actual).abs())
        .collect();
    if errors.is_empty() {
        None
    } else {
        Some(mean(&errors) * 100.0)
    }
}

/// Descriptive statistics of one series, computed in a single pass over a sorted copy.
///
/// The spread is the population standard deviation: the summary describes the
/// observed history itself, not a sample drawn from it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let variance = population_variance(values);
        let q1 = percentile_sorted(&sorted, 25.0);
        let q3 = percentile_sorted(&sorted, 75.0);
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];

        Self {
            count: values.len(),
            mean: mean(values),
            median: percentile_sorted(&sorted, 50.0),
            std_dev: variance.sqrt(),
            variance,
            q1,
            q3,
            iqr: q3 - q1,
            min,
            max,
            range: max - min,
        }
    }
}
