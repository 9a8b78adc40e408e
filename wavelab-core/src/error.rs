//! Error taxonomy for series validation, wave detection and indicators.
//!
//! None of these are retried internally: the detector is pure and
//! deterministic, so the same input always fails the same way.

use thiserror::Error;

/// Minimum number of points a series needs before detection runs.
pub const MIN_SERIES_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaveError {
    #[error("insufficient data: {len} point(s), need at least {required}")]
    InsufficientData { len: usize, required: usize },

    #[error("invalid sensitivity {value}: must be a positive finite fraction")]
    InvalidSensitivity { value: f64 },

    #[error("malformed series at index {index}: {reason}")]
    MalformedSeries { index: usize, reason: String },

    #[error("invalid RSI period {period}: must be >= 1")]
    InvalidRsiPeriod { period: usize },
}

impl WaveError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        WaveError::MalformedSeries {
            index,
            reason: reason.into(),
        }
    }
}
