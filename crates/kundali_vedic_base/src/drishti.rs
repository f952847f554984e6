//! Graha drishti (planetary aspect) strength in virupas (BPHS).
//!
//! The angular distance is measured forward from the aspecting graha to the
//! aspected point. Full aspect is 60 virupas.

use crate::graha::Graha;
use crate::util::normalize_360;

/// Aspect strength common to every graha, piecewise linear in the
/// forward distance (full at 180°, none below 30° or from 300°).
pub fn base_virupa(angular_distance: f64) -> f64 {
    let a = normalize_360(angular_distance);
    match a {
        a if a < 30.0 => 0.0,
        a if a < 60.0 => (a - 30.0) / 2.0,
        a if a < 90.0 => a - 45.0,
        a if a < 120.0 => (120.0 - a) / 2.0 + 30.0,
        a if a < 150.0 => 150.0 - a,
        a if a < 180.0 => (a - 150.0) * 2.0,
        a if a < 300.0 => (300.0 - a) / 2.0,
        _ => 0.0,
    }
}

/// Extra strength of the special aspects: Mars on the 4th and 8th, Jupiter
/// on the 5th and 9th, Saturn on the 3rd and 10th.
pub fn special_virupa(graha: Graha, angular_distance: f64) -> f64 {
    let a = normalize_360(angular_distance);
    match graha {
        Graha::Mangal if (90.0..120.0).contains(&a) || (210.0..240.0).contains(&a) => 15.0,
        Graha::Guru if (120.0..150.0).contains(&a) || (240.0..270.0).contains(&a) => 30.0,
        Graha::Shani if (60.0..90.0).contains(&a) || (270.0..300.0).contains(&a) => 45.0,
        _ => 0.0,
    }
}

/// Total aspect of `graha` at `source_lon` on `target_lon`.
pub fn graha_drishti(graha: Graha, source_lon: f64, target_lon: f64) -> f64 {
    let distance = normalize_360(target_lon - source_lon);
    base_virupa(distance) + special_virupa(graha, distance)
}
