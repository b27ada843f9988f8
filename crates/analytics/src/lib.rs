//! # Pulse Analytics Engine
//!
//! The public face of the analytics core. [`AnalyticsEngine`] is built once from an
//! `AnalyticsConfig` and exposes every calculation the rest of the platform needs:
//!
//! - **Scoring:** benchmark normalization, category and overall aggregation, and the
//!   health scorecard.
//! - **Anomaly detection:** the four-method ensemble over one or many metric series.
//! - **Forecasting:** the four-model revenue ensemble.
//! - **Snapshot keys:** deterministic digests of a calculation's inputs, for callers
//!   that memoize results.
//!
//! ## Architectural Principles
//!
//! - **Pure calculation:** no I/O beyond loading configuration, no persisted state.
//! - **Errors only for broken contracts:** short histories and unknown industries
//!   produce flagged or neutral results; unordered series, non-finite samples and
//!   invalid settings produce an [`AnalyticsError`].

pub mod engine;
pub mod error;
pub mod snapshot;

pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use snapshot::SnapshotKey;
