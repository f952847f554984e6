//! Self-contained analytic ephemeris.
//!
//! Planets come from Keplerian mean elements (heliocentric, J2000 ecliptic)
//! differenced against the Earth–Moon barycentre, then carried to the
//! equinox of date with the general precession in longitude. Light-time and
//! aberration are not applied. Typical errors are arcminutes for the
//! planets and about 0.01° for the Moon, which is ample for sign, nakshatra
//! and house work but not for eclipse prediction.

mod kepler;
mod moon;

use kundali_frames::{cartesian_to_spherical, general_precession_longitude_deg};
use kundali_time::{DAYS_PER_CENTURY, Instant};
use tracing::debug;

use crate::{Body, BodyPosition, Ephemeris, EphemerisConfig, EphemerisError};
use kepler::{EARTH_MOON, JUPITER, MARS, MERCURY, OrbitalElements, SATURN, VENUS, heliocentric_position};

/// First instant covered: 1800-01-01 00:00 UT.
pub const VALID_START_JD: f64 = 2_378_496.5;
/// Last instant covered: 2051-01-01 00:00 UT.
pub const VALID_END_JD: f64 = 2_470_172.5;

/// Low-precision analytic ephemeris valid from 1800 to 2050.
#[derive(Debug, Clone, Default)]
pub struct AnalyticEphemeris {
    config: EphemerisConfig,
}

impl AnalyticEphemeris {
    pub fn new(config: EphemerisConfig) -> Result<Self, EphemerisError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EphemerisConfig {
        &self.config
    }
}

/// (longitude of date °, latitude °, distance AU) at `t` centuries TT.
fn geocentric(body: Body, t: f64) -> (f64, f64, f64) {
    let planet = |el: &OrbitalElements| {
        let p = heliocentric_position(el, t);
        let e = heliocentric_position(&EARTH_MOON, t);
        [p[0] - e[0], p[1] - e[1], p[2] - e[2]]
    };
    let xyz = match body {
        Body::Moon => return moon::moon_position(t),
        Body::Rahu => return (moon::mean_node_longitude(t), 0.0, 0.0),
        Body::Ketu => return ((moon::mean_node_longitude(t) + 180.0).rem_euclid(360.0), 0.0, 0.0),
        Body::Sun => {
            let e = heliocentric_position(&EARTH_MOON, t);
            [-e[0], -e[1], -e[2]]
        }
        Body::Mercury => planet(&MERCURY),
        Body::Venus => planet(&VENUS),
        Body::Mars => planet(&MARS),
        Body::Jupiter => planet(&JUPITER),
        Body::Saturn => planet(&SATURN),
    };
    let s = cartesian_to_spherical(&xyz);
    let lon_of_date = (s.lon_deg + general_precession_longitude_deg(t)).rem_euclid(360.0);
    (lon_of_date, s.lat_deg, s.distance)
}

impl Ephemeris for AnalyticEphemeris {
    fn position(&self, instant: Instant, body: Body) -> Result<BodyPosition, EphemerisError> {
        if !self.covers(instant) {
            debug!(jd = instant.jd_ut(), %body, "instant outside analytic ephemeris range");
            return Err(EphemerisError::OutOfRange {
                jd_ut: instant.jd_ut(),
                start_jd: VALID_START_JD,
                end_jd: VALID_END_JD,
            });
        }

        let t = instant.centuries_tt();
        let (lon, lat, dist) = geocentric(body, t);

        let h = self.config.motion_step_days;
        let dt = h / DAYS_PER_CENTURY;
        let before = geocentric(body, t - dt).0;
        let after = geocentric(body, t + dt).0;
        let swept = (after - before + 540.0).rem_euclid(360.0) - 180.0;

        Ok(BodyPosition {
            body,
            longitude_deg: lon,
            latitude_deg: lat,
            distance_au: dist,
            speed_deg_per_day: swept / (2.0 * h),
        })
    }

    fn valid_range(&self) -> (Instant, Instant) {
        (Instant::from_jd_ut(VALID_START_JD), Instant::from_jd_ut(VALID_END_JD))
    }
}
