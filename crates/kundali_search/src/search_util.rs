//! Numeric helpers shared by the return and transit searches.

use kundali_core::{Ephemeris, EphemerisError};
use kundali_time::Instant;
use kundali_vedic_base::util::normalize_pm180;
use kundali_vedic_base::{AyanamshaSystem, Graha, VedicError, sidereal_longitude};
use serde::{Deserialize, Serialize};

/// A function value at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub instant: Instant,
    pub value: f64,
}

impl Sample {
    pub fn new(instant: Instant, value: f64) -> Self {
        Self { instant, value }
    }
}

/// Whether a sign change between two wrapped values is a real zero
/// crossing rather than the jump from +180 to −180.
pub(crate) fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

/// Signed distance of `lon` from `target`, degrees in [−180, 180).
pub(crate) fn signed_delta(lon: f64, target: f64) -> f64 {
    normalize_pm180(lon - target)
}

/// Signed distance of the `lon`–`natal` separation from an aspect angle.
///
/// Its absolute value is the folded-separation deviation; its sign flips
/// when the aspect perfects.
pub(crate) fn signed_aspect_deviation(lon: f64, natal: f64, angle: f64) -> f64 {
    let a = normalize_pm180(lon - natal - angle);
    let b = normalize_pm180(lon - natal + angle);
    if a.abs() <= b.abs() { a } else { b }
}

/// Point where the chord between two samples crosses zero.
pub(crate) fn linear_root(lo: Sample, hi: Sample) -> Instant {
    let span = hi.instant.days_since(lo.instant);
    let denom = hi.value - lo.value;
    if denom == 0.0 {
        return lo.instant.add_days(span / 2.0);
    }
    let frac = (-lo.value / denom).clamp(0.0, 1.0);
    lo.instant.add_days(frac * span)
}

pub(crate) fn midpoint(a: Instant, b: Instant) -> Instant {
    a.add_days(b.days_since(a) / 2.0)
}

/// Vertex offset, in steps from the middle sample, of the parabola through
/// three equally spaced values. Clamped to one step either side.
pub(crate) fn parabolic_vertex(y0: f64, y1: f64, y2: f64) -> f64 {
    let denom = y0 - 2.0 * y1 + y2;
    if denom.abs() < 1e-15 {
        return 0.0;
    }
    (0.5 * (y0 - y2) / denom).clamp(-1.0, 1.0)
}

/// Sidereal longitude of a graha, with errors lifted to the search layer.
pub(crate) fn graha_longitude(
    ephemeris: &dyn Ephemeris,
    instant: Instant,
    graha: Graha,
    system: AyanamshaSystem,
) -> Result<f64, VedicError> {
    sidereal_longitude(ephemeris, instant, graha.body(), system)
}

/// Fail early, with the ephemeris' own error, when a range leaves coverage.
pub(crate) fn check_coverage(
    ephemeris: &dyn Ephemeris,
    from: Instant,
    to: Instant,
) -> Result<(), EphemerisError> {
    let (start, end) = ephemeris.valid_range();
    for t in [from, to] {
        if t < start || t > end {
            return Err(EphemerisError::OutOfRange {
                jd_ut: t.jd_ut(),
                start_jd: start.jd_ut(),
                end_jd: end.jd_ut(),
            });
        }
    }
    Ok(())
}
