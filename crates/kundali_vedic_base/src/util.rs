//! Angle helpers shared by the vedic calculations.

/// Fraction of a segment treated as "on the boundary".
///
/// A longitude within this fraction below a segment edge is assigned to the
/// segment that starts at the edge, so floating-point noise never pushes an
/// exact boundary value into the lower segment.
pub const BOUNDARY_EPS: f64 = 1e-9;

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize an angle to [-180, 180) degrees.
pub fn normalize_pm180(deg: f64) -> f64 {
    normalize_360(deg + 180.0) - 180.0
}

/// Forward (counter-clockwise) arc from `from` to `to`, degrees in [0, 360).
pub fn arc_forward(from: f64, to: f64) -> f64 {
    normalize_360(to - from)
}

/// Smallest unsigned separation of two longitudes, degrees in [0, 180].
pub fn separation(a: f64, b: f64) -> f64 {
    normalize_pm180(a - b).abs()
}

/// Index of the equal segment of width `span` containing `lon`.
///
/// Values on a boundary resolve to the higher index. The result is clamped
/// to `count - 1`.
pub fn segment_index(lon: f64, span: f64, count: u8) -> u8 {
    let idx = (normalize_360(lon) / span + BOUNDARY_EPS).floor();
    (idx as u8).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_both_ways() {
        assert_eq!(normalize_360(360.0), 0.0);
        assert_eq!(normalize_360(-10.0), 350.0);
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
        assert_eq!(normalize_360(-1e-20), 0.0);
    }

    #[test]
    fn pm180_range() {
        assert_eq!(normalize_pm180(190.0), -170.0);
        assert_eq!(normalize_pm180(-190.0), 170.0);
        assert_eq!(normalize_pm180(180.0), -180.0);
    }

    #[test]
    fn forward_arc_wraps() {
        assert_eq!(arc_forward(350.0, 10.0), 20.0);
        assert_eq!(arc_forward(10.0, 350.0), 340.0);
    }

    #[test]
    fn separation_symmetric() {
        assert_eq!(separation(10.0, 350.0), 20.0);
        assert_eq!(separation(350.0, 10.0), 20.0);
        assert_eq!(separation(0.0, 180.0), 180.0);
    }

    #[test]
    fn boundaries_go_up() {
        let span = 360.0 / 27.0;
        for i in 0..27u8 {
            let edge = f64::from(i) * span;
            assert_eq!(segment_index(edge, span, 27), i, "edge {i}");
        }
        assert_eq!(segment_index(359.999_999, 30.0, 12), 11);
    }
}
