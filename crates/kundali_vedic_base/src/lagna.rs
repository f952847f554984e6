//! Lagna (Ascendant) and MC (Midheaven).
//!
//! Both are tropical ecliptic longitudes of date. The sidereal time chain is
//! UT → GMST → LST, and the obliquity is the IAU 2006 mean obliquity of
//! date (Meeus ch. 13–14).

use std::f64::consts::TAU;

use kundali_frames::mean_obliquity_rad;
use kundali_time::{GeoLocation, Instant, local_sidereal_time_rad};

/// Local sidereal time (= right ascension of the meridian) in radians.
pub fn ramc_rad(instant: Instant, location: &GeoLocation) -> f64 {
    local_sidereal_time_rad(instant.gmst_rad(), location.longitude_rad()).rem_euclid(TAU)
}

/// Ascendant for a given RAMC, latitude and obliquity (all radians).
///
/// `atan2(−cos θ, sin θ cos ε + tan φ sin ε)` is the western (setting)
/// intersection of the ecliptic with the horizon; the rising point is the
/// opposite one, so both arguments are negated.
pub fn ascendant_rad(ramc: f64, latitude: f64, obliquity: f64) -> f64 {
    let y = -ramc.cos();
    let x = ramc.sin() * obliquity.cos() + latitude.tan() * obliquity.sin();
    f64::atan2(-y, -x).rem_euclid(TAU)
}

/// MC: `atan2(sin θ, cos θ cos ε)`.
pub fn midheaven_rad(ramc: f64, obliquity: f64) -> f64 {
    f64::atan2(ramc.sin(), ramc.cos() * obliquity.cos()).rem_euclid(TAU)
}

/// Tropical Lagna and MC in degrees, `(lagna, mc)`, both in [0, 360).
pub fn lagna_and_mc_deg(instant: Instant, location: &GeoLocation) -> (f64, f64) {
    let eps = mean_obliquity_rad(instant.centuries_tt());
    let ramc = ramc_rad(instant, location);
    let asc = ascendant_rad(ramc, location.latitude_rad(), eps);
    let mc = midheaven_rad(ramc, eps);
    (asc.to_degrees(), mc.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 0.409_092_6;

    /// Altitude (rad) of an ecliptic point and whether it is east of the
    /// meridian.
    fn horizon_check(lam: f64, ramc: f64, lat: f64) -> (f64, bool) {
        let ra = f64::atan2(lam.sin() * EPS.cos(), lam.cos());
        let dec = (EPS.sin() * lam.sin()).asin();
        let h = ramc - ra;
        let alt = (lat.sin() * dec.sin() + lat.cos() * dec.cos() * h.cos()).asin();
        (alt, h.sin() < 0.0)
    }

    #[test]
    fn equator_with_equinox_on_meridian() {
        let asc = ascendant_rad(0.0, 0.0, EPS).to_degrees();
        let mc = midheaven_rad(0.0, EPS).to_degrees();
        assert!((asc - 90.0).abs() < 1e-9, "{asc}");
        assert!(mc.abs() < 1e-9 || (mc - 360.0).abs() < 1e-9, "{mc}");
    }

    #[test]
    fn ascendant_is_rising_point() {
        for (ramc_deg, lat_deg) in [(100.0, 19.0), (250.0, 45.0), (10.0, -30.0), (333.0, 60.0)] {
            let ramc = f64::to_radians(ramc_deg);
            let lat = f64::to_radians(lat_deg);
            let asc = ascendant_rad(ramc, lat, EPS);
            let (alt, east) = horizon_check(asc, ramc, lat);
            assert!(alt.abs() < 1e-9, "altitude {alt} at {ramc_deg}/{lat_deg}");
            assert!(east, "setting point returned at {ramc_deg}/{lat_deg}");
        }
    }

    #[test]
    fn mc_follows_ramc_quadrant() {
        for ramc_deg in [45.0, 135.0, 225.0, 315.0] {
            let mc = midheaven_rad(f64::to_radians(ramc_deg), EPS).to_degrees();
            assert!((mc - ramc_deg).abs() < 3.0, "{ramc_deg} -> {mc}");
        }
    }
}
