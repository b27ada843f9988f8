use configuration::{EnsembleWeights, ForecastSettings};
use forecasting::{Forecaster, blend, standard_models};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Four non-negative weights, in hundredths, that add up to exactly one.
fn unit_weights() -> impl Strategy<Value = EnsembleWeights> {
    (0u32..=100, 0u32..=100, 0u32..=100).prop_map(|(a, b, c)| {
        let mut cuts = [a, b, c];
        cuts.sort_unstable();
        let hundredths = |n: u32| Decimal::new(i64::from(n), 2);
        EnsembleWeights {
            linear: hundredths(cuts[0]),
            exp_smoothing: hundredths(cuts[1] - cuts[0]),
            moving_avg: hundredths(cuts[2] - cuts[1]),
            holt_winters: hundredths(100 - cuts[2]),
        }
    })
}

proptest! {
    #[test]
    fn weights_summing_to_one_are_accepted(weights in unit_weights()) {
        prop_assert_eq!(weights.total(), Decimal::ONE);
        let settings = ForecastSettings { weights, ..ForecastSettings::default() };
        prop_assert!(Forecaster::new(settings).is_ok());
    }

    #[test]
    fn any_drift_from_one_is_refused(weights in unit_weights(), drift in 1i64..1000) {
        let drifted = EnsembleWeights {
            holt_winters: weights.holt_winters + Decimal::new(drift, 6),
            ..weights
        };
        let settings = ForecastSettings { weights: drifted, ..ForecastSettings::default() };
        prop_assert!(Forecaster::new(settings).is_err());
    }

    #[test]
    fn blend_stays_between_model_forecasts(
        weights in unit_weights(),
        values in prop::collection::vec(1.0f64..10_000.0, 7..60),
    ) {
        let models = standard_models(&ForecastSettings::default());
        let (forecasts, blended) = blend(&models, &weights, &values);
        let lo = forecasts.values().copied().fold(f64::INFINITY, f64::min);
        let hi = forecasts.values().copied().fold(f64::NEG_INFINITY, f64::max);
        let slack = 1e-6 * hi.abs().max(1.0);
        prop_assert!(blended >= lo - slack && blended <= hi + slack);
    }
}
