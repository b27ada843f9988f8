use crate::growth::GrowthRate;
use configuration::ConfidenceBands;
use core_types::{ConfidenceLevel, Horizon};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: i64,
    pub upper: i64,
}

/// Projected revenue over one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub horizon: Horizon,
    pub total: i64,
    pub per_day: i64,
    pub confidence: ConfidenceLevel,
    pub interval: ConfidenceInterval,
}

/// Extrapolates the blended next-day forecast over a horizon.
///
/// The daily rate compounds up to the midpoint of the horizon,
/// `per_day = blended * (1 + g)^(h / 2)`, floored at zero. The interval is the total
/// widened by the horizon's band.
pub fn project(
    blended: f64,
    growth: &GrowthRate,
    horizon: Horizon,
    bands: &ConfidenceBands,
) -> ForecastResult {
    let days = f64::from(horizon.days());
    let per_day = (blended * growth.daily_factor().powf(days / 2.0)).max(0.0);
    let total = per_day * days;
    let band = bands.for_horizon(horizon);

    ForecastResult {
        horizon,
        total: total.round() as i64,
        per_day: per_day.round() as i64,
        confidence: horizon.confidence(),
        interval: ConfidenceInterval {
            lower: (total * (1.0 - band)).round() as i64,
            upper: (total * (1.0 + band)).round() as i64,
        },
    }
}

/// Projections for every horizon, shortest first.
pub fn project_all(blended: f64, growth: &GrowthRate, bands: &ConfidenceBands) -> Vec<ForecastResult> {
    Horizon::ALL
        .iter()
        .map(|&h| project(blended, growth, h, bands))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_growth_scales_linearly() {
        let bands = ConfidenceBands::default();
        let results = project_all(1000.0, &GrowthRate::default(), &bands);

        let week = &results[0];
        assert_eq!(week.horizon, Horizon::Week);
        assert_eq!(week.total, 7000);
        assert_eq!(week.per_day, 1000);
        assert_eq!(week.confidence, ConfidenceLevel::High);
        assert_eq!(week.interval, ConfidenceInterval { lower: 5950, upper: 8050 });

        let two_months = &results[2];
        assert_eq!(two_months.total, 60_000);
        assert_eq!(two_months.confidence, ConfidenceLevel::Medium);
        assert_eq!(two_months.interval.lower, 46_500);

        let quarter = &results[3];
        assert_eq!(quarter.confidence, ConfidenceLevel::Low);
        assert_eq!(quarter.interval, ConfidenceInterval { lower: 67_500, upper: 112_500 });
    }

    #[test]
    fn growth_compounds_to_midpoint() {
        let growth = GrowthRate {
            daily: 1.0,
            weekly: 7.0,
            monthly: 0.0,
        };
        let month = project(1000.0, &growth, Horizon::Month, &ConfidenceBands::default());
        // 1000 * 1.01^15 = 1160.97
        assert_eq!(month.per_day, 1161);
        assert_eq!(month.total, 34_829);
    }

    #[test]
    fn steep_decline_floors_at_zero() {
        let growth = GrowthRate {
            daily: -150.0,
            weekly: -1050.0,
            monthly: 0.0,
        };
        let week = project(1000.0, &growth, Horizon::Week, &ConfidenceBands::default());
        assert_eq!(week.total, 0);
        assert_eq!(week.per_day, 0);
        assert_eq!(week.interval, ConfidenceInterval { lower: 0, upper: 0 });
    }

    #[test]
    fn negative_blend_floors_at_zero() {
        let quarter = project(-40.0, &GrowthRate::default(), Horizon::Quarter, &ConfidenceBands::default());
        assert_eq!(quarter.total, 0);
    }
}
