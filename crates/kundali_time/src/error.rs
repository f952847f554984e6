//! Error types for date/time parsing and location validation.

use thiserror::Error;

/// Errors from birth-moment resolution.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The date string did not parse, or named a day that does not exist.
    #[error("invalid date '{input}': {reason}")]
    InvalidDateFormat { input: String, reason: String },
    /// The time string did not parse.
    #[error("invalid time '{input}': {reason}")]
    InvalidTimeFormat { input: String, reason: String },
    /// Latitude, longitude or UTC offset outside its valid range.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
}

impl TimeError {
    pub(crate) fn date(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn time(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTimeFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
