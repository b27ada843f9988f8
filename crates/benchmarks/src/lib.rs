//! # Pulse Benchmark Normalizer
//!
//! Converts heterogeneous raw metrics (rates, costs, durations, counts) into a
//! comparable 0-100 score using per-industry piecewise-linear benchmark curves.
//!
//! ## Public API
//!
//! - `normalize`: the pure curve mapping for a single value.
//! - `Normalizer`: resolves the curve for an `(industry, metric)` pair from the
//!   loaded configuration and applies it, honouring caller overrides.
//! - `to_ten_point`: 0-100 to 0-10 conversion.

pub mod curve;
pub mod normalizer;

pub use curve::{NEUTRAL_SCORE, normalize, to_ten_point};
pub use normalizer::{CurveSource, Normalizer, ResolvedCurve};
