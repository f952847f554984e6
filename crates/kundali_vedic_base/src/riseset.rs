//! Sunrise and sunset of the ephemeris Sun.
//!
//! Iterative hour-angle method: start from the approximate local noon, find
//! the hour angle at which the Sun's centre sits 50′ below the horizon
//! (34′ refraction + 16′ semidiameter), then re-evaluate the Sun at the
//! estimated event time until the correction is below a tenth of a second.

use std::f64::consts::{PI, TAU};

use kundali_core::{Body, Ephemeris};
use kundali_frames::{ecliptic_to_equatorial, mean_obliquity_deg};
use kundali_time::{GeoLocation, Instant, calendar_to_jd, local_sidereal_time_rad};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::VedicError;

/// Depression of the Sun's centre at the visible rise/set, degrees.
pub const HORIZON_DEPRESSION_DEG: f64 = 50.0 / 60.0;

const MAX_ITERATIONS: usize = 8;

/// Convergence threshold in days (~0.086 seconds).
const CONVERGENCE_DAYS: f64 = 1.0e-6;

/// Sidereal rotation rate, radians per solar day.
const SIDEREAL_RATE: f64 = TAU * 1.002_737_811_911_354_6;

/// Sunrise and sunset of one local civil date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarDay {
    pub sunrise: Instant,
    pub sunset: Instant,
}

impl SolarDay {
    /// Midpoint of sunrise and sunset.
    pub fn solar_noon(&self) -> Instant {
        self.sunrise.add_days(self.day_length_days() / 2.0)
    }

    pub fn day_length_days(&self) -> f64 {
        self.sunset.days_since(self.sunrise)
    }
}

/// Approximate local solar noon (UT Julian Date) of a civil date.
pub fn approximate_local_noon_jd(year: i32, month: u32, day: u32, longitude_deg: f64) -> f64 {
    calendar_to_jd(year, month, f64::from(day)) + 0.5 - longitude_deg / 360.0
}

/// Sun's apparent-of-date right ascension and declination, radians.
fn sun_ra_dec(ephemeris: &dyn Ephemeris, instant: Instant) -> Result<(f64, f64), VedicError> {
    let pos = ephemeris.position(instant, Body::Sun)?;
    let eps = mean_obliquity_deg(instant.centuries_tt());
    let eq = ecliptic_to_equatorial(pos.longitude_deg, pos.latitude_deg, eps);
    Ok((eq.ra_deg.to_radians(), eq.dec_deg.to_radians()))
}

/// Hour angle at which the Sun reaches the rise/set altitude.
fn event_hour_angle(phi: f64, dec: f64) -> Result<f64, VedicError> {
    let h0 = (-HORIZON_DEPRESSION_DEG).to_radians();
    let cos_h = (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    if cos_h > 1.0 {
        return Err(VedicError::NoSunrise("the Sun stays below the horizon"));
    }
    if cos_h < -1.0 {
        return Err(VedicError::NoSunrise("the Sun stays above the horizon"));
    }
    Ok(cos_h.acos())
}

fn wrap_pi(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a > PI { a - TAU } else { a }
}

fn local_hour_angle(instant: Instant, location: &GeoLocation, ra: f64) -> f64 {
    let lst = local_sidereal_time_rad(instant.gmst_rad(), location.longitude_rad());
    wrap_pi(lst - ra)
}

/// One rise (`rising = true`) or set event near `noon`.
pub fn compute_rise_set(
    ephemeris: &dyn Ephemeris,
    location: &GeoLocation,
    noon: Instant,
    rising: bool,
) -> Result<Instant, VedicError> {
    location.validate()?;
    let phi = location.latitude_rad();

    let (ra, dec) = sun_ra_dec(ephemeris, noon)?;
    let h0 = event_hour_angle(phi, dec)?;
    let transit = noon.add_days(-local_hour_angle(noon, location, ra) / SIDEREAL_RATE);
    let mut event = if rising {
        transit.add_days(-h0 / SIDEREAL_RATE)
    } else {
        transit.add_days(h0 / SIDEREAL_RATE)
    };

    for iteration in 0..MAX_ITERATIONS {
        let (ra_i, dec_i) = sun_ra_dec(ephemeris, event)?;
        let h_i = event_hour_angle(phi, dec_i)?;
        let target = if rising { -h_i } else { h_i };
        let correction = wrap_pi(target - local_hour_angle(event, location, ra_i)) / SIDEREAL_RATE;
        event = event.add_days(correction);
        trace!(iteration, rising, correction, "rise/set refinement");
        if correction.abs() < CONVERGENCE_DAYS {
            break;
        }
    }
    Ok(event)
}

/// Sunrise and sunset of a local civil date.
///
/// Polar day and polar night are reported as [`VedicError::NoSunrise`].
pub fn solar_day(
    ephemeris: &dyn Ephemeris,
    location: &GeoLocation,
    year: i32,
    month: u32,
    day: u32,
) -> Result<SolarDay, VedicError> {
    let noon = Instant::from_jd_ut(approximate_local_noon_jd(year, month, day, location.longitude_deg));
    let sunrise = compute_rise_set(ephemeris, location, noon, true)?;
    let sunset = compute_rise_set(ephemeris, location, noon, false)?;
    Ok(SolarDay { sunrise, sunset })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_noon_by_longitude() {
        let greenwich = approximate_local_noon_jd(2023, 2, 24, 0.0);
        assert!((greenwich - (calendar_to_jd(2023, 2, 24.0) + 0.5)).abs() < 1e-10);
        let east = approximate_local_noon_jd(2023, 2, 24, 90.0);
        assert!((greenwich - east - 0.25).abs() < 1e-10);
    }

    #[test]
    fn equator_hour_angle_is_near_quarter_turn() {
        let h = event_hour_angle(0.0, 0.0).unwrap();
        // 90° plus the 50′ depression.
        assert!((h.to_degrees() - 90.8333).abs() < 1e-3);
    }

    #[test]
    fn polar_cases() {
        let phi = 80f64.to_radians();
        let winter = (-23.0f64).to_radians();
        let summer = 23f64.to_radians();
        assert!(matches!(event_hour_angle(phi, winter), Err(VedicError::NoSunrise(_))));
        assert!(matches!(event_hour_angle(phi, summer), Err(VedicError::NoSunrise(_))));
    }

    #[test]
    fn wrap_pi_range() {
        assert!((wrap_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_pi(-0.1) + 0.1).abs() < 1e-12);
    }
}
