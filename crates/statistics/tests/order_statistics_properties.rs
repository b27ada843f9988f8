use proptest::prelude::*;
use statistics::{Summary, median, percentile, population_std_dev};

fn finite_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, 1..60)
}

proptest! {
    #[test]
    fn percentile_is_monotone_in_p(values in finite_values(), a in 0.0..100.0f64, b in 0.0..100.0f64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(percentile(&values, lo) <= percentile(&values, hi) + 1e-9);
    }

    #[test]
    fn percentile_stays_within_observed_range(values in finite_values(), p in 0.0..100.0f64) {
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let q = percentile(&values, p);
        prop_assert!(q >= min - 1e-9 && q <= max + 1e-9);
    }

    #[test]
    fn summary_agrees_with_free_functions(values in finite_values()) {
        let summary = Summary::from_values(&values);
        prop_assert_eq!(summary.count, values.len());
        prop_assert!((summary.median - median(&values)).abs() < 1e-6);
        prop_assert!((summary.std_dev - population_std_dev(&values)).abs() < 1e-6);
        prop_assert!(summary.q1 <= summary.q3 + 1e-9);
    }
}
