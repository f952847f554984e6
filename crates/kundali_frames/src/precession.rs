//! IAU 2006 general precession in ecliptic longitude.
//!
//! p_A is the accumulated westward drift of the equinox along the ecliptic
//! since J2000.0. The engine uses it twice: to carry J2000 ecliptic
//! longitudes to the equinox of date, and to make the ayanamsha time-varying.
//!
//! Source: Capitaine, Wallace & Chapront 2003, A&A 412, 567 (Table 1).

/// General precession in longitude, arcseconds.
///
/// `t` is Julian centuries of TT since J2000.0.
pub fn general_precession_longitude_arcsec(t: f64) -> f64 {
    t * (5028.796195 + t * (1.1054348 + t * (0.00007964 + t * (-0.000023857 - t * 0.0000000383))))
}

/// General precession in longitude, degrees.
pub fn general_precession_longitude_deg(t: f64) -> f64 {
    general_precession_longitude_arcsec(t) / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn zero_at_epoch() {
        assert_eq!(general_precession_longitude_arcsec(0.0), 0.0);
    }

    #[test]
    fn about_fifty_arcsec_per_year() {
        assert_abs_diff_eq!(general_precession_longitude_arcsec(0.01), 50.29, epsilon = 0.1);
    }

    #[test]
    fn antisymmetric_to_first_order() {
        let fwd = general_precession_longitude_arcsec(0.9);
        let back = general_precession_longitude_arcsec(-0.9);
        assert!(back < 0.0);
        // Only the T² term breaks the symmetry.
        assert_abs_diff_eq!(fwd + back, 2.0 * 1.1054348 * 0.81, epsilon = 1e-3);
    }
}
