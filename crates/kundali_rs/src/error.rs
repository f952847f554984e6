//! Unified error type for the facade.

use std::path::PathBuf;

use kundali_core::EphemerisError;
use kundali_search::SearchError;
use kundali_time::TimeError;
use kundali_vedic_base::VedicError;
use serde::Serialize;
use thiserror::Error;

/// Coarse classification reported to callers of the request contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCategory {
    /// Malformed date, time, location or parameter.
    InputValidation,
    /// The instant lies outside the ephemeris range.
    EphemerisRange,
    /// An internal consistency check failed.
    InvariantViolation,
    /// The configuration file or an engine setting is unusable.
    Configuration,
}

/// Any error the facade can return.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KundaliError {
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Vedic(#[from] VedicError),
    #[error(transparent)]
    Search(#[from] SearchError),
    /// The request document did not deserialize.
    #[error("malformed request: {0}")]
    Request(String),
    /// The configuration did not parse or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KundaliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Time(_) | Self::Request(_) => ErrorCategory::InputValidation,
            Self::Ephemeris(e) => ephemeris_category(e),
            Self::Vedic(e) => vedic_category(e),
            Self::Search(e) => match e {
                SearchError::Ephemeris(inner) => ephemeris_category(inner),
                SearchError::Vedic(inner) => vedic_category(inner),
                SearchError::InvalidConfig(_) => ErrorCategory::Configuration,
                SearchError::InvalidInput(_) => ErrorCategory::InputValidation,
                _ => ErrorCategory::InvariantViolation,
            },
            Self::Config(_) | Self::Io { .. } => ErrorCategory::Configuration,
        }
    }
}

fn ephemeris_category(e: &EphemerisError) -> ErrorCategory {
    match e {
        EphemerisError::OutOfRange { .. } => ErrorCategory::EphemerisRange,
        EphemerisError::UnsupportedBody(_) => ErrorCategory::InputValidation,
        EphemerisError::InvalidConfig(_) => ErrorCategory::Configuration,
        _ => ErrorCategory::InvariantViolation,
    }
}

fn vedic_category(e: &VedicError) -> ErrorCategory {
    match e {
        VedicError::Ephemeris(inner) => ephemeris_category(inner),
        VedicError::Time(_)
        | VedicError::InvalidLocation(_)
        | VedicError::InvalidInput(_)
        | VedicError::NoSunrise(_) => ErrorCategory::InputValidation,
        _ => ErrorCategory::InvariantViolation,
    }
}

impl From<serde_json::Error> for KundaliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Request(e.to_string())
    }
}

impl From<toml::de::Error> for KundaliError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
