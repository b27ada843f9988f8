//! # Pulse Anomaly Detection Ensemble
//!
//! Flags outliers in a metric time series with four independent statistical tests
//! and reconciles their findings into one ranked list.
//!
//! ## Detection pipeline
//!
//! 1. The series is checked for chronological order and finite values.
//! 2. Summary statistics (mean, population standard deviation, quartiles) are
//!    computed once.
//! 3. Each [`Detector`] runs on the full series: z-score bands, Tukey fences,
//!    control-chart limits, and deviation from the preceding rolling window.
//! 4. Findings for the same `(timestamp, value)` collapse into one anomaly that keeps
//!    the highest severity and lists every method that flagged it.
//!
//! [`AnomalyDetector::detect_many`] scores several metrics together and raises an
//! [`Alert`] for each warning or critical anomaly.

pub mod anomaly;
pub mod detectors;
pub mod ensemble;
pub mod error;
pub mod overview;
pub mod reconcile;

pub use anomaly::{Anomaly, DetectionReport};
pub use detectors::{
    Detector, IqrDetector, MovingAverageDetector, SpcDetector, ZScoreDetector, standard_detectors,
};
pub use ensemble::AnomalyDetector;
pub use error::AnomalyError;
pub use overview::{Alert, AnomalyOverview, AnomalyStatus, anomaly_score};
pub use reconcile::reconcile;
