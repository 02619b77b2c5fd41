//! Engine error types.
//!
//! Expected conditions (short input, empty lookback windows, no order-block
//! candidate) are never errors; they surface as empty collections or `None`.
//! Only contract violations at the boundary are reported here.

use thiserror::Error;

use crate::config::ConfigError;

/// What is wrong with a single candle (or its place in the series).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CandleDefect {
    #[error("{field} is not a finite number")]
    NonFinitePrice { field: &'static str },

    #[error("high {high} is below low {low}")]
    InvertedRange { high: f64, low: f64 },

    #[error("open/close lies outside the high-low range")]
    BodyOutsideRange,

    #[error("time {current} is earlier than the previous candle's time {previous}")]
    NonMonotonicTime { previous: i64, current: i64 },
}

/// Errors from [`analyze`](crate::engine::analyze) and input fingerprinting.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid input at candle {index}: {defect}")]
    InvalidInput { index: usize, defect: CandleDefect },

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to serialize input: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<(usize, CandleDefect)> for AnalysisError {
    fn from((index, defect): (usize, CandleDefect)) -> Self {
        AnalysisError::InvalidInput { index, defect }
    }
}
