//! Ephemeris contract and the bundled analytic ephemeris.
//!
//! Everything above this crate asks for positions through the
//! [`Ephemeris`] trait: one call, one body, one instant, tropical ecliptic
//! longitude of date plus daily motion. Implementations must be
//! deterministic and must refuse (never extrapolate) instants outside their
//! documented range.
//!
//! [`AnalyticEphemeris`] is a self-contained low-precision implementation:
//! Keplerian mean elements for the planets, a truncated lunar theory for the
//! Moon and the mean lunar node for Rahu/Ketu.

pub mod analytic;
pub mod error;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kundali_time::Instant;
use serde::{Deserialize, Serialize};

pub use analytic::AnalyticEphemeris;
pub use error::EphemerisError;

/// Bodies the ephemeris contract covers.
///
/// `Rahu` and `Ketu` are the mean ascending and descending lunar nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

/// All bodies in a fixed order.
pub const ALL_BODIES: [Body; 9] = [
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
    Body::Rahu,
    Body::Ketu,
];

impl Body {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// Mean time (days) for the body's geocentric longitude to complete one
    /// circuit of the zodiac.
    ///
    /// Mercury and Venus accompany the Sun, so their geocentric mean period
    /// is the year. The nodes regress; their period is still positive.
    pub const fn mean_geocentric_period_days(self) -> f64 {
        match self {
            Self::Sun | Self::Mercury | Self::Venus => 365.256_363,
            Self::Moon => 27.321_661,
            Self::Mars => 686.980,
            Self::Jupiter => 4_332.589,
            Self::Saturn => 10_759.22,
            Self::Rahu | Self::Ketu => 6_798.383,
        }
    }

    /// Upper bound on the body's geocentric speed in longitude, deg/day.
    pub const fn max_daily_motion_deg(self) -> f64 {
        match self {
            Self::Sun => 1.03,
            Self::Moon => 16.0,
            Self::Mercury => 2.3,
            Self::Venus => 1.3,
            Self::Mars => 0.85,
            Self::Jupiter => 0.26,
            Self::Saturn => 0.14,
            Self::Rahu | Self::Ketu => 0.06,
        }
    }

    /// True for the lunar nodes, which always move backwards.
    pub const fn is_node(self) -> bool {
        matches!(self, Self::Rahu | Self::Ketu)
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    /// Accepts English names and the common Sanskrit graha names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sun" | "surya" => Ok(Self::Sun),
            "moon" | "chandra" => Ok(Self::Moon),
            "mercury" | "buddh" | "budha" => Ok(Self::Mercury),
            "venus" | "shukra" => Ok(Self::Venus),
            "mars" | "mangal" => Ok(Self::Mars),
            "jupiter" | "guru" => Ok(Self::Jupiter),
            "saturn" | "shani" => Ok(Self::Saturn),
            "rahu" | "northnode" => Ok(Self::Rahu),
            "ketu" | "southnode" => Ok(Self::Ketu),
            other => Err(format!("unknown body '{other}'")),
        }
    }
}

/// Geocentric position of one body at one instant.
///
/// Longitude is tropical, referred to the mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPosition {
    pub body: Body,
    /// Ecliptic longitude, degrees in [0, 360).
    pub longitude_deg: f64,
    /// Ecliptic latitude, degrees.
    pub latitude_deg: f64,
    /// Geocentric distance in AU (zero for the nodes).
    pub distance_au: f64,
    /// Rate of change of longitude, degrees/day. Negative means retrograde.
    pub speed_deg_per_day: f64,
}

impl BodyPosition {
    pub fn is_retrograde(&self) -> bool {
        self.speed_deg_per_day < 0.0
    }
}

/// Source of body positions.
///
/// Implementations are shared read-only across threads.
pub trait Ephemeris: Send + Sync {
    /// Position of `body` at `instant`.
    ///
    /// Fails with [`EphemerisError::OutOfRange`] outside [`Self::valid_range`].
    fn position(&self, instant: Instant, body: Body) -> Result<BodyPosition, EphemerisError>;

    /// Inclusive validity range.
    fn valid_range(&self) -> (Instant, Instant);

    /// Whether `instant` lies inside [`Self::valid_range`].
    fn covers(&self, instant: Instant) -> bool {
        let (start, end) = self.valid_range();
        instant >= start && instant <= end
    }

    /// Convenience: tropical longitude only.
    fn longitude(&self, instant: Instant, body: Body) -> Result<f64, EphemerisError> {
        self.position(instant, body).map(|p| p.longitude_deg)
    }
}

/// Configuration for [`AnalyticEphemeris`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisConfig {
    /// Half-width of the symmetric difference used for daily motion, days.
    pub motion_step_days: f64,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            motion_step_days: 0.01,
        }
    }
}

impl EphemerisConfig {
    pub fn validate(&self) -> Result<(), EphemerisError> {
        if !self.motion_step_days.is_finite() || self.motion_step_days <= 0.0 {
            return Err(EphemerisError::InvalidConfig("motion_step_days must be positive"));
        }
        if self.motion_step_days > 1.0 {
            return Err(EphemerisError::InvalidConfig("motion_step_days must not exceed 1 day"));
        }
        Ok(())
    }
}
