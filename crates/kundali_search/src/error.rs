//! Error types for the search engine.

use kundali_core::EphemerisError;
use kundali_vedic_base::VedicError;
use thiserror::Error;

/// Errors from return and transit searches.
///
/// Failing to converge is not an error; it is reported as a
/// [`ReturnOutcome::NotFound`](crate::ReturnOutcome::NotFound).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Vedic(#[from] VedicError),
    #[error("invalid search configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid search input: {0}")]
    InvalidInput(&'static str),
}
