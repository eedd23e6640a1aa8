//! Error types shared by the clock and the harness.

use thiserror::Error;

/// Failure to read the monotonic clock
#[derive(Debug, Error)]
pub enum ClockError {
    /// The OS rejected the read
    #[error("monotonic clock read failed: {0}")]
    Read(#[from] std::io::Error),

    /// The timestamp does not fit the nanosecond counter
    #[error("monotonic clock returned an out-of-range timestamp ({seconds}s)")]
    OutOfRange {
        /// Raw seconds field
        seconds: i64,
    },
}

/// Errors produced while measuring a trial
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Clock read failed at the start or end of the timed loop
    #[error(transparent)]
    Clock(#[from] ClockError),

    /// Rejected before any measurement ran
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl MeasureError {
    /// Shorthand for a [`MeasureError::InvalidConfiguration`]
    pub fn invalid(reason: impl Into<String>) -> Self {
        MeasureError::InvalidConfiguration(reason.into())
    }

    /// Short machine-readable tag for reports
    pub fn kind(&self) -> &'static str {
        match self {
            MeasureError::Clock(_) => "clock",
            MeasureError::InvalidConfiguration(_) => "invalid_configuration",
        }
    }
}
