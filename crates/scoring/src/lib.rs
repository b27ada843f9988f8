//! # Pulse Weighted Aggregator
//!
//! Turns normalized metric scores into category scores, and category scores into a
//! single overall health score.
//!
//! Absent metrics are excluded rather than scored as zero, so a business is never
//! penalized for a channel it does not measure. Industry modifiers scale category
//! scores before the overall average and every adjusted category is capped at 100.
//!
//! ## Public API
//!
//! - `weighted_average` / `weighted_overall_score`: the pure aggregation functions.
//! - `Aggregator`: binds the functions to the configured weights and normalizer.
//! - `Scorecard`: overall status, weakest and strongest categories, headroom and
//!   industry comparison.

pub mod aggregator;
pub mod components;
pub mod scorecard;

pub use aggregator::Aggregator;
pub use components::{
    CategoryScore, NEUTRAL_SCORE, ScoreComponent, apply_modifiers, weighted_average,
    weighted_overall_score,
};
pub use scorecard::{
    ComparisonStatus, ImprovementPotential, IndustryComparison, Priority, ScoreStatus, Scorecard,
};
