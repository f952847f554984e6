//! Heliocentric planet positions from Keplerian mean elements.
//!
//! Elements and linear rates are referred to the J2000 ecliptic and
//! equinox. Source: E. M. Standish, "Keplerian Elements for Approximate
//! Positions of the Major Planets" (JPL), Table 1, valid 1800–2050.

/// One element: value at J2000 and rate per Julian century.
type Element = (f64, f64);

/// Mean orbital elements.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrbitalElements {
    /// Semi-major axis, AU.
    a: Element,
    /// Eccentricity.
    e: Element,
    /// Inclination, degrees.
    incl: Element,
    /// Mean longitude, degrees.
    mean_lon: Element,
    /// Longitude of perihelion, degrees.
    peri_lon: Element,
    /// Longitude of the ascending node, degrees.
    node_lon: Element,
}

pub(crate) const MERCURY: OrbitalElements = OrbitalElements {
    a: (0.387_099_27, 0.000_000_37),
    e: (0.205_635_93, 0.000_019_06),
    incl: (7.004_979_02, -0.005_947_49),
    mean_lon: (252.250_323_50, 149_472.674_111_75),
    peri_lon: (77.457_796_28, 0.160_476_89),
    node_lon: (48.330_765_93, -0.125_340_81),
};

pub(crate) const VENUS: OrbitalElements = OrbitalElements {
    a: (0.723_335_66, 0.000_003_90),
    e: (0.006_776_72, -0.000_041_07),
    incl: (3.394_676_05, -0.000_788_90),
    mean_lon: (181.979_099_50, 58_517.815_387_29),
    peri_lon: (131.602_467_18, 0.002_683_29),
    node_lon: (76.679_842_55, -0.277_694_18),
};

/// Earth–Moon barycentre.
pub(crate) const EARTH_MOON: OrbitalElements = OrbitalElements {
    a: (1.000_002_61, 0.000_005_62),
    e: (0.016_711_23, -0.000_043_92),
    incl: (-0.000_015_31, -0.012_946_68),
    mean_lon: (100.464_571_66, 35_999.372_449_81),
    peri_lon: (102.937_681_93, 0.323_273_64),
    node_lon: (0.0, 0.0),
};

pub(crate) const MARS: OrbitalElements = OrbitalElements {
    a: (1.523_710_34, 0.000_018_47),
    e: (0.093_394_10, 0.000_078_82),
    incl: (1.849_691_42, -0.008_131_31),
    mean_lon: (-4.553_432_05, 19_140.302_684_99),
    peri_lon: (-23.943_629_59, 0.444_410_88),
    node_lon: (49.559_538_91, -0.292_573_43),
};

pub(crate) const JUPITER: OrbitalElements = OrbitalElements {
    a: (5.202_887_00, -0.000_116_07),
    e: (0.048_386_24, -0.000_132_53),
    incl: (1.304_396_95, -0.001_837_14),
    mean_lon: (34.396_440_51, 3_034.746_127_75),
    peri_lon: (14.728_479_83, 0.212_526_68),
    node_lon: (100.473_909_09, 0.204_691_06),
};

pub(crate) const SATURN: OrbitalElements = OrbitalElements {
    a: (9.536_675_94, -0.001_250_60),
    e: (0.053_861_79, -0.000_509_91),
    incl: (2.485_991_87, 0.001_936_09),
    mean_lon: (49.954_244_23, 1_222.493_622_01),
    peri_lon: (92.598_878_31, -0.418_972_16),
    node_lon: (113.662_424_48, -0.288_677_94),
};

const KEPLER_MAX_ITER: usize = 30;
const KEPLER_TOL: f64 = 1e-14;

fn at(el: Element, t: f64) -> f64 {
    el.0 + el.1 * t
}

/// Solve Kepler's equation E − e·sin E = M (radians) by Newton iteration.
pub(crate) fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (mean_anomaly - (ecc - e * ecc.sin())) / (1.0 - e * ecc.cos());
        ecc += delta;
        if delta.abs() < KEPLER_TOL {
            break;
        }
    }
    ecc
}

/// Heliocentric ecliptic-J2000 position in AU at `t` centuries TT.
pub(crate) fn heliocentric_position(el: &OrbitalElements, t: f64) -> [f64; 3] {
    let a = at(el.a, t);
    let e = at(el.e, t);
    let incl = at(el.incl, t).to_radians();
    let mean_lon = at(el.mean_lon, t);
    let peri_lon = at(el.peri_lon, t);
    let node = at(el.node_lon, t);

    let arg_peri = (peri_lon - node).to_radians();
    let mean_anomaly = ((mean_lon - peri_lon + 180.0).rem_euclid(360.0) - 180.0).to_radians();
    let ecc = eccentric_anomaly(mean_anomaly, e);

    // Position in the orbital plane, x towards perihelion.
    let xp = a * (ecc.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc.sin();

    let (sw, cw) = arg_peri.sin_cos();
    let (so, co) = node.to_radians().sin_cos();
    let (si, ci) = incl.sin_cos();

    [
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        (sw * si) * xp + (cw * si) * yp,
    ]
}
