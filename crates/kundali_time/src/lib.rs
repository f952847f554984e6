//! Time handling for the kundali engine.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - A ΔT (TT − UT) model for the ephemeris time argument
//! - Greenwich / local sidereal time
//! - The [`Instant`] type: a continuous UT day count used by every calculation
//! - [`GeoLocation`] and the birth-moment resolver that turns user-entered
//!   date/time strings into an [`Instant`]

pub mod birth;
pub mod civil;
pub mod delta_t;
pub mod error;
pub mod julian;
pub mod location;
pub mod sidereal;

use serde::{Deserialize, Serialize};

pub use birth::{BirthMoment, ResolverConfig, TimePrecision, parse_date, parse_time, resolve_birth_moment};
pub use civil::CivilDateTime;
pub use delta_t::delta_t_seconds;
pub use error::TimeError;
pub use julian::{DAYS_PER_CENTURY, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};
pub use location::GeoLocation;
pub use sidereal::{earth_rotation_angle_rad, gmst_rad, local_sidereal_time_rad};

/// A point on the Universal Time axis, stored as a Julian Date (UT).
///
/// Instants are plain `Copy` values: they are never mutated, only derived
/// from one another with [`Instant::add_days`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant {
    jd_ut: f64,
}

impl Instant {
    /// Create an instant from a Julian Date in UT.
    pub const fn from_jd_ut(jd_ut: f64) -> Self {
        Self { jd_ut }
    }

    /// Create an instant from a UT civil date/time.
    pub fn from_utc(dt: &CivilDateTime) -> Self {
        Self::from_jd_ut(dt.to_jd(0.0))
    }

    /// Julian Date (UT).
    pub fn jd_ut(self) -> f64 {
        self.jd_ut
    }

    /// Julian Date (TT), using the ΔT model in [`delta_t`].
    pub fn jd_tt(self) -> f64 {
        self.jd_ut + delta_t_seconds(self.decimal_year()) / SECONDS_PER_DAY
    }

    /// Julian centuries of TT since J2000.0.
    pub fn centuries_tt(self) -> f64 {
        (self.jd_tt() - J2000_JD) / DAYS_PER_CENTURY
    }

    /// Approximate decimal Gregorian year, good enough for ΔT lookup.
    pub fn decimal_year(self) -> f64 {
        2000.0 + (self.jd_ut - J2000_JD) / 365.25
    }

    /// A new instant `days` later (negative for earlier).
    pub fn add_days(self, days: f64) -> Self {
        Self::from_jd_ut(self.jd_ut + days)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(self, earlier: Instant) -> f64 {
        self.jd_ut - earlier.jd_ut
    }

    /// UT calendar representation.
    pub fn to_utc(self) -> CivilDateTime {
        CivilDateTime::from_jd(self.jd_ut, 0.0)
    }

    /// Local civil calendar representation for a fixed UTC offset.
    pub fn to_local(self, utc_offset_hours: f64) -> CivilDateTime {
        CivilDateTime::from_jd(self.jd_ut, utc_offset_hours)
    }

    /// Day of week of the local civil date, 0 = Sunday … 6 = Saturday.
    pub fn local_weekday(self, utc_offset_hours: f64) -> u8 {
        let jd_local = self.jd_ut + utc_offset_hours / 24.0;
        ((jd_local + 1.5).floor() as i64).rem_euclid(7) as u8
    }

    /// Greenwich mean sidereal time in radians, [0, 2π).
    pub fn gmst_rad(self) -> f64 {
        gmst_rad(self.jd_ut)
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}Z", self.to_utc())
    }
}
