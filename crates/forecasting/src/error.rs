use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("Invalid time series: {0}")]
    InvalidSeries(#[from] CoreError),

    #[error("Invalid forecast settings: {0}")]
    InvalidSettings(String),
}
