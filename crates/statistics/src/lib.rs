//! # Pulse Statistics Toolkit
//!
//! Pure numeric helpers shared by the anomaly and forecasting ensembles.
//!
//! Every function is total: empty or too-short input yields a neutral value
//! (0, the input itself, or `None`) instead of an error, so callers decide what
//! "not enough data" means for them.

pub mod descriptive;
pub mod regression;
pub mod smoothing;

pub use descriptive::{
    Summary, coefficient_of_variation, mean, mean_absolute_percentage_error, median,
    min_max_scale, percentile, percentile_sorted, population_std_dev, population_variance,
    std_dev, variance,
};
pub use regression::{LinearFit, TREND_SLOPE_THRESHOLD, correlation, linear_regression};
pub use smoothing::{
    exponential_moving_average, exponential_smoothing, moving_average, weighted_moving_average,
};
