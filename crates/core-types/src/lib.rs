//! # Pulse Core Types
//!
//! The shared vocabulary of the analytics core: metric samples and time series,
//! benchmark curves, and the small enums (severity, detection method, trend,
//! forecast horizon) that every other crate speaks.
//!
//! As a Layer 0 crate it depends on nothing else in the workspace.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{
    ConfidenceLevel, DetectionMethod, Direction, Horizon, Polarity, Severity, Trend,
};
pub use error::CoreError;
pub use structs::{BenchmarkCurve, MetricSample, TimeSeries};
