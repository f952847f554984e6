//! Sidereal time.
//!
//! All functions take a UT Julian Date. UT1 − UTC (< 0.9 s) is not modelled;
//! at that level the error in the ascendant is a few arcseconds.
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use std::f64::consts::{PI, TAU};

use crate::julian::{DAYS_PER_CENTURY, J2000_JD};

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Earth Rotation Angle, radians in [0, 2π).
pub fn earth_rotation_angle_rad(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time, radians in [0, 2π).
///
/// GMST = ERA + 0.014506 + 4612.156534·T + 1.3915817·T² − 0.00000044·T³
///        − 0.000029956·T⁴ − 0.0000000368·T⁵   (arcseconds)
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let t = (jd_ut - J2000_JD) / DAYS_PER_CENTURY;
    let poly_arcsec = 0.014506
        + t * (4612.156534 + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 - t * 0.0000000368))));
    (earth_rotation_angle_rad(jd_ut) + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Local sidereal time from GMST and east longitude, radians in [0, 2π).
pub fn local_sidereal_time_rad(gmst: f64, longitude_east_rad: f64) -> f64 {
    (gmst + longitude_east_rad).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gmst_at_j2000_midnight() {
        // 2000-01-01 0h UT: GMST = 6h 39m 51.17s ≈ 99.967°
        let deg = gmst_rad(2_451_544.5).to_degrees();
        assert!((deg - 99.967).abs() < 0.01, "GMST = {deg}");
    }

    #[test]
    fn gmst_gains_about_a_degree_per_day() {
        let g1 = gmst_rad(2_451_545.0).to_degrees();
        let g2 = gmst_rad(2_451_546.0).to_degrees();
        let gain = (g2 - g1).rem_euclid(360.0);
        assert!((gain - 0.9856).abs() < 0.001, "gain = {gain}");
    }

    #[test]
    fn lst_wraps() {
        let lst = local_sidereal_time_rad(TAU - 0.1, 0.2);
        assert!((lst - 0.1).abs() < 1e-12);
    }

    #[test]
    fn era_in_range() {
        for &jd in &[2_378_496.5, 2_451_545.0, 2_460_000.5] {
            let era = earth_rotation_angle_rad(jd);
            assert!((0.0..TAU).contains(&era));
        }
    }
}
