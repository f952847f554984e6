//! Ephemeris errors.

use thiserror::Error;

use crate::Body;

/// Errors raised by an [`Ephemeris`](crate::Ephemeris) implementation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The instant lies outside the range the source is valid for.
    #[error("JD {jd_ut} (UT) outside ephemeris range [{start_jd}, {end_jd}]")]
    OutOfRange {
        jd_ut: f64,
        start_jd: f64,
        end_jd: f64,
    },
    /// The source has no model for this body.
    #[error("body {0} not supported by this ephemeris")]
    UnsupportedBody(Body),
    #[error("invalid ephemeris config: {0}")]
    InvalidConfig(&'static str),
}
