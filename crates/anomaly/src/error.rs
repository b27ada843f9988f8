use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnomalyError {
    #[error("Invalid time series: {0}")]
    InvalidSeries(#[from] CoreError),

    #[error("Invalid detector settings: {0}")]
    InvalidSettings(String),
}
