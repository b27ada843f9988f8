/// Trailing simple moving average.
///
/// The output has `n - period + 1` values, the first one averaging `values[..period]`.
/// A period of 0 or one longer than the input returns the input unchanged.
pub fn moving_average(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || period > values.len() {
        return values.to_vec();
    }
    values
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / period as f64)
        .collect()
}

/// Exponential moving average with `alpha = 2 / (period + 1)`, seeded with the first
/// value. The output is as long as the input.
pub fn exponential_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return values.to_vec();
    }
    let alpha = 2.0 / (period as f64 + 1.0);
    exponential_smoothing(values, alpha)
}

/// Single exponential smoothing `S_t = alpha * x_t + (1 - alpha) * S_{t-1}`, `S_0 = x_0`.
pub fn exponential_smoothing(values: &[f64], alpha: f64) -> Vec<f64> {
    let mut smoothed = Vec::with_capacity(values.len());
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return smoothed;
    };
    let mut level = first;
    smoothed.push(level);
    for &x in iter {
        level = alpha * x + (1.0 - alpha) * level;
        smoothed.push(level);
    }
    smoothed
}

/// Linearly weighted moving average: inside each window the oldest point has weight 1
/// and the most recent has weight `period`.
///
/// The period is clamped to the input length; an empty input or a zero period yields
/// the input unchanged.
pub fn weighted_moving_average(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.min(values.len());
    if period == 0 {
        return values.to_vec();
    }
    let weight_sum = (period * (period + 1) / 2) as f64;
    values
        .windows(period)
        .map(|w| {
            w.iter()
                .enumerate()
                .map(|(i, &x)| x * (i + 1) as f64)
                .sum::<f64>()
                / weight_sum
        })
        .collect()
}
