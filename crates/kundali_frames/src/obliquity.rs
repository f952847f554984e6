//! Mean obliquity of the ecliptic.
//!
//! Source: IAU 2006 (Hilton et al. 2006), ε_A polynomial.

/// Mean obliquity at J2000.0, degrees (84381.406″).
pub const OBLIQUITY_J2000_DEG: f64 = 84_381.406 / 3600.0;

/// Mean obliquity of date in degrees; `t` in Julian centuries TT from J2000.0.
pub fn mean_obliquity_deg(t: f64) -> f64 {
    let arcsec = 84_381.406
        + t * (-46.836769 + t * (-0.0001831 + t * (0.00200340 + t * (-0.000000576 - t * 0.0000000434))));
    arcsec / 3600.0
}

/// Mean obliquity of date in radians.
pub fn mean_obliquity_rad(t: f64) -> f64 {
    mean_obliquity_deg(t).to_radians()
}
