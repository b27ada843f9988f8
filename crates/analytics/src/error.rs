use anomaly::AnomalyError;
use configuration::ConfigError;
use forecasting::ForecastError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Anomaly detection failed: {0}")]
    Anomaly(#[from] AnomalyError),

    #[error("Forecasting failed: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Could not encode snapshot inputs: {0}")]
    Snapshot(#[from] serde_json::Error),
}
