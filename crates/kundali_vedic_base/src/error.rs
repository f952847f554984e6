//! Error types for Vedic calculations.

use kundali_core::EphemerisError;
use kundali_time::TimeError;
use thiserror::Error;

/// Errors from the vedic calculation layer.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// The ephemeris could not supply a position.
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    /// Date/time or location input rejected.
    #[error(transparent)]
    Time(#[from] TimeError),
    /// Geographic input unusable for the requested method.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// Caller-supplied parameter out of range.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// The Sun does not rise or set on the requested date.
    #[error("no sunrise/sunset: {0}")]
    NoSunrise(&'static str),
    /// An internal consistency check failed.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
