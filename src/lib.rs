//! # Pulse
//!
//! Statistical analytics core for business health diagnostics: benchmark
//! normalization, weighted scoring, anomaly detection and revenue forecasting,
//! without machine learning.
//!
//! Host applications normally need only [`AnalyticsEngine`] and a loaded
//! configuration:
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! pulse::telemetry::init_tracing()?;
//! let config = pulse::load_config()?;
//! let engine = pulse::AnalyticsEngine::new(&config)?;
//! let score = engine.normalize(2.4, "cafe", "engagement_rate", None);
//! # let _ = score;
//! # Ok(())
//! # }
//! ```
//!
//! The component crates are re-exported for callers that want a single piece.

pub mod telemetry;

pub use analytics::{AnalyticsEngine, AnalyticsError, SnapshotKey};
pub use configuration::{AnalyticsConfig, ConfigError, load_config, load_config_from_path};
pub use core_types::{MetricSample, TimeSeries};

pub use anomaly;
pub use benchmarks;
pub use configuration;
pub use core_types;
pub use forecasting;
pub use scoring;
pub use statistics;
