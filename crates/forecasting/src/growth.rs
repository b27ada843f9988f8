use serde::{Deserialize, Serialize};

/// Days compared for the month-over-month growth rate.
const MONTH_WINDOW: usize = 30;
const DAYS_PER_WEEK: f64 = 7.0;

/// Revenue growth, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthRate {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

impl GrowthRate {
    /// Daily growth as a multiplicative factor, `1 + daily / 100`.
    pub fn daily_factor(&self) -> f64 {
        1.0 + self.daily / 100.0
    }
}

/// Compares the trailing `window` days against the `window` days before them.
///
/// The daily rate is the window-over-window change spread evenly over the window.
/// Monthly growth compares the last 30 days with the 30 before them. Either rate is
/// 0 when there is not enough history or the earlier window has no positive total.
pub fn growth_rate(values: &[f64], window: usize) -> GrowthRate {
    let daily = window_change(values, window).map_or(0.0, |change| change / window as f64);
    GrowthRate {
        daily,
        weekly: daily * DAYS_PER_WEEK,
        monthly: window_change(values, MONTH_WINDOW).unwrap_or(0.0),
    }
}

/// Percentage change of the last `window` values over the `window` before them.
fn window_change(values: &[f64], window: usize) -> Option<f64> {
    let n = values.len();
    if window == 0 || n < 2 * window {
        return None;
    }
    let last: f64 = values[n - window..].iter().sum();
    let previous: f64 = values[n - 2 * window..n - window].iter().sum();
    (previous > 0.0).then(|| (last - previous) / previous * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn two_weeks_give_daily_and_weekly_growth() {
        let mut values = vec![100.0; 7];
        values.extend([114.0; 7]);
        let growth = growth_rate(&values, 7);
        // +14% over the week, 2% per day
        assert!(close(growth.daily, 2.0));
        assert!(close(growth.weekly, 14.0));
        assert_eq!(growth.monthly, 0.0);
        assert!(close(growth.daily_factor(), 1.02));
    }

    #[test]
    fn under_two_windows_is_flat() {
        assert_eq!(growth_rate(&[100.0; 13], 7), GrowthRate::default());
    }

    #[test]
    fn zero_prior_window_is_flat() {
        let mut values = vec![0.0; 7];
        values.extend([50.0; 7]);
        assert_eq!(growth_rate(&values, 7).daily, 0.0);
    }

    #[test]
    fn monthly_needs_sixty_days() {
        let mut values = vec![100.0; 30];
        values.extend([90.0; 30]);
        let growth = growth_rate(&values, 7);
        assert!(close(growth.monthly, -10.0));
        assert_eq!(growth_rate(&values[1..], 7).monthly, 0.0);
    }
}
