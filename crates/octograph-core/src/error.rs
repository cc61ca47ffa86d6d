use chrono::NaiveDate;
use thiserror::Error;

/// Local validation failures raised by the synchronous calendar pipeline.
///
/// These indicate caller misuse rather than environmental failure, so they
/// are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The explicit range ends before it starts.
    #[error("invalid range: {to} is before {from}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// The year cannot be represented as a calendar date.
    #[error("year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    /// Contribution counts are never negative.
    #[error("invalid contribution count {0}: counts must be non-negative")]
    InvalidCount(i64),

    /// The cache duration string does not match `<digits><s|m|h|d|y>`.
    #[error("invalid cache duration format: {0}")]
    InvalidDurationFormat(String),
}

/// Errors raised while loading application configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
