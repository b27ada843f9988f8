use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Time series is not in chronological order: sample {index} precedes sample {previous}")]
    UnorderedSeries { index: usize, previous: usize },

    #[error("Time series sample {index} holds a non-finite value ({value})")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("Benchmark curve is malformed: {0}")]
    MalformedCurve(String),
}
