//! Ecliptic → equatorial conversion.

/// Right ascension and declination, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialCoords {
    /// Right ascension, [0, 360).
    pub ra_deg: f64,
    pub dec_deg: f64,
}

/// Rotate ecliptic longitude/latitude about the equinox by the obliquity.
///
/// All angles in degrees; the result is in the same equinox as the input.
pub fn ecliptic_to_equatorial(lon_deg: f64, lat_deg: f64, obliquity_deg: f64) -> EquatorialCoords {
    let (sl, cl) = lon_deg.to_radians().sin_cos();
    let (sb, cb) = lat_deg.to_radians().sin_cos();
    let (se, ce) = obliquity_deg.to_radians().sin_cos();

    let dec = (sb * ce + cb * se * sl).asin();
    let ra = (sl * ce * cb - sb * se).atan2(cl * cb);
    EquatorialCoords {
        ra_deg: ra.to_degrees().rem_euclid(360.0),
        dec_deg: dec.to_degrees(),
    }
}
