//! Bhava (house) cusp computation.
//!
//! Cusps are computed on the tropical ecliptic of date from the Lagna, the
//! MC and the RAMC, then shifted into the sidereal frame by the ayanamsha.
//! Whole-sign houses are the exception: they are defined on sidereal signs
//! and are built after the shift.

use std::f64::consts::PI;

use kundali_frames::mean_obliquity_rad;
use kundali_time::{GeoLocation, Instant};
use tracing::trace;

use crate::bhava_types::{Bhava, BhavaResult, BhavaSystem};
use crate::error::VedicError;
use crate::lagna::{ascendant_rad, midheaven_rad, ramc_rad};
use crate::rashi::{RASHI_SPAN, rashi_from_longitude};
use crate::util::{arc_forward, normalize_360};

/// Latitude limit for latitude-dependent systems.
pub const MAX_LATITUDE_DEG: f64 = 66.5;

/// Compute the twelve houses in the sidereal frame.
///
/// `ayanamsha_deg` is subtracted from every tropical cusp.
pub fn compute_bhavas(
    instant: Instant,
    location: &GeoLocation,
    system: BhavaSystem,
    ayanamsha_deg: f64,
) -> Result<BhavaResult, VedicError> {
    location.validate()?;
    if system.latitude_dependent() && location.latitude_deg.abs() > MAX_LATITUDE_DEG {
        return Err(VedicError::InvalidLocation(
            "latitude exceeds 66.5 deg limit for this house system",
        ));
    }

    let eps = mean_obliquity_rad(instant.centuries_tt());
    let ramc = ramc_rad(instant, location);
    let lat = location.latitude_rad();
    let asc = ascendant_rad(ramc, lat, eps).to_degrees();
    let mc = midheaven_rad(ramc, eps).to_degrees();

    let lagna_sid = normalize_360(asc - ayanamsha_deg);
    let mc_sid = normalize_360(mc - ayanamsha_deg);

    let cusps = match system {
        BhavaSystem::Equal => shift(&compute_equal(asc), ayanamsha_deg),
        BhavaSystem::Sripati => shift(&compute_sripati(asc, mc), ayanamsha_deg),
        BhavaSystem::Placidus => shift(&compute_placidus(asc, mc, ramc, lat, eps), ayanamsha_deg),
        BhavaSystem::WholeSign => {
            let sign_start = f64::from(rashi_from_longitude(lagna_sid).rashi_index) * RASHI_SPAN;
            compute_equal(sign_start)
        }
    };
    trace!(?system, lagna = lagna_sid, mc = mc_sid, "bhava cusps");

    Ok(BhavaResult {
        system,
        bhavas: build_bhavas(&cusps),
        lagna_deg: lagna_sid,
        mc_deg: mc_sid,
    })
}

fn shift(cusps: &[f64; 12], by: f64) -> [f64; 12] {
    cusps.map(|c| normalize_360(c - by))
}

/// Equal division: cusp[i] = start + i*30.
fn compute_equal(start_deg: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_360(start_deg + i as f64 * 30.0))
}

/// Sripati (Porphyry): trisect the four quadrant arcs between Asc/IC/Desc/MC.
///
/// Cusp 1 = Asc, Cusp 4 = IC, Cusp 7 = Desc, Cusp 10 = MC.
fn compute_sripati(asc_deg: f64, mc_deg: f64) -> [f64; 12] {
    let desc_deg = normalize_360(asc_deg + 180.0);
    let ic_deg = normalize_360(mc_deg + 180.0);
    let angles = [asc_deg, ic_deg, desc_deg, mc_deg];

    let mut cusps = [0.0; 12];
    for (q, from) in angles.iter().enumerate() {
        let to = angles[(q + 1) % 4];
        let arc = arc_forward(*from, to);
        cusps[q * 3] = *from;
        cusps[q * 3 + 1] = normalize_360(from + arc / 3.0);
        cusps[q * 3 + 2] = normalize_360(from + 2.0 * arc / 3.0);
    }
    cusps
}

/// Placidus: cusps 11/12 trisect the diurnal semi-arc above the horizon,
/// cusps 2/3 the nocturnal semi-arc below it. The rest are opposites.
fn compute_placidus(asc_deg: f64, mc_deg: f64, ramc: f64, lat: f64, eps: f64) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    cusps[0] = asc_deg;
    cusps[9] = mc_deg;
    cusps[10] = placidus_cusp(ramc, lat, eps, 1.0 / 3.0, true);
    cusps[11] = placidus_cusp(ramc, lat, eps, 2.0 / 3.0, true);
    cusps[1] = placidus_cusp(ramc, lat, eps, 2.0 / 3.0, false);
    cusps[2] = placidus_cusp(ramc, lat, eps, 1.0 / 3.0, false);
    for i in 3..9 {
        cusps[i] = normalize_360(cusps[(i + 6) % 12] + 180.0);
    }
    cusps
}

/// One Placidus cusp by fixed-point iteration on the right ascension.
///
/// Above the horizon the cusp's hour angle east of the meridian is
/// `fraction × DSA`; below it, the hour angle from the lower meridian is
/// `fraction × NSA`.
fn placidus_cusp(ramc: f64, lat: f64, eps: f64, fraction: f64, above_horizon: bool) -> f64 {
    let target = |ra: f64| {
        let dsa = semi_arc_rad(ecliptic_declination_of_ra(ra, eps), lat);
        if above_horizon {
            ramc + fraction * dsa
        } else {
            ramc + PI - fraction * (PI - dsa)
        }
    };

    let mut ra = if above_horizon {
        ramc + fraction * PI / 2.0
    } else {
        ramc + PI - fraction * PI / 2.0
    };
    for _ in 0..100 {
        let next = target(ra);
        if (next - ra).abs() < 1e-12 {
            ra = next;
            break;
        }
        ra = next;
    }
    ecliptic_longitude_of_ra(ra, eps).to_degrees()
}

/// Diurnal semi-arc: `acos(−tan δ tan φ)`.
fn semi_arc_rad(dec: f64, lat: f64) -> f64 {
    (-(dec.tan() * lat.tan())).clamp(-1.0, 1.0).acos()
}

/// Declination of the ecliptic point with right ascension `ra`.
fn ecliptic_declination_of_ra(ra: f64, eps: f64) -> f64 {
    (eps.tan() * ra.sin()).atan()
}

/// Ecliptic longitude of the ecliptic point with right ascension `ra`.
fn ecliptic_longitude_of_ra(ra: f64, eps: f64) -> f64 {
    f64::atan2(ra.sin(), ra.cos() * eps.cos()).rem_euclid(2.0 * PI)
}

fn build_bhavas(cusps: &[f64; 12]) -> [Bhava; 12] {
    std::array::from_fn(|i| Bhava {
        number: i as u8 + 1,
        cusp_deg: cusps[i],
        end_deg: cusps[(i + 1) % 12],
    })
}

/// House (1–12) containing a longitude.
///
/// The house whose forward arc from its cusp reaches `lon` soonest wins, so
/// a longitude exactly on a cusp belongs to the house that cusp opens.
pub fn bhava_for_longitude(cusps: &[f64; 12], lon: f64) -> u8 {
    let mut best = 0usize;
    let mut best_arc = f64::INFINITY;
    for (i, cusp) in cusps.iter().enumerate() {
        let arc = arc_forward(*cusp, lon);
        if arc < best_arc {
            best_arc = arc;
            best = i;
        }
    }
    best as u8 + 1
}

/// Whether the cusps increase monotonically (mod 360) walked from cusp 1,
/// each house having a positive span and all spans summing to one circle.
pub fn cusps_are_monotonic(cusps: &[f64; 12]) -> bool {
    let mut total = 0.0;
    for i in 0..12 {
        let span = arc_forward(cusps[i], cusps[(i + 1) % 12]);
        if span <= 0.0 {
            return false;
        }
        total += span;
    }
    (total - 360.0).abs() < 1e-6
}
