use crate::descriptive::mean;
use core_types::Trend;
use serde::{Deserialize, Serialize};

/// Slopes with a magnitude at or below this are reported as a flat trend.
pub const TREND_SLOPE_THRESHOLD: f64 = 0.01;

/// Ordinary least squares fit of `y` against its index `x = 0..n-1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, 0 when the series has no variance.
    pub r_squared: f64,
    pub trend: Trend,
}

impl LinearFit {
    /// Value of the fitted line at position `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

pub fn linear_regression(values: &[f64]) -> LinearFit {
    let n = values.len();
    if n < 2 {
        return LinearFit {
            slope: 0.0,
            intercept: values.first().copied().unwrap_or(0.0),
            r_squared: 0.0,
            trend: Trend::Stable,
        };
    }

    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = mean(values);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let intercept = y_mean - slope * x_mean;

    let ss_tot: f64 = values.iter().map(|&y| (y - y_mean).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 {
        let ss_res: f64 = values
            .iter()
            .enumerate()
            .map(|(i, &y)| (y - (intercept + slope * i as f64)).powi(2))
            .sum();
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        0.0
    };

    LinearFit {
        slope,
        intercept,
        r_squared,
        trend: classify_slope(slope),
    }
}

fn classify_slope(slope: f64) -> Trend {
    if slope > TREND_SLOPE_THRESHOLD {
        Trend::Up
    } else if slope < -TREND_SLOPE_THRESHOLD {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Pearson correlation over the paired prefix of `x` and `y`.
///
/// Zero when fewer than two pairs exist or either side is constant.
pub fn correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let (mx, my) = (mean(x), mean(y));

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y) {
        cov += (a - mx) * (b - my);
        vx += (a - mx).powi(2);
        vy += (b - my).powi(2);
    }
    if vx <= 0.0 || vy <= 0.0 {
        return 0.0;
    }
    (cov / (vx.sqrt() * vy.sqrt())).clamp(-1.0, 1.0)
}
