//! Rashi (zodiac sign) lookup and degree/minute/second formatting.
//!
//! Twelve equal signs of 30°, Mesha (Aries) starting at sidereal 0°.

use serde::{Deserialize, Serialize};

use crate::util::{normalize_360, segment_index};

/// Width of one rashi in degrees.
pub const RASHI_SPAN: f64 = 30.0;

/// The 12 rashis starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in zodiacal order.
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha = 0).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(idx: u8) -> Self {
        ALL_RASHIS[(idx % 12) as usize]
    }

    /// Odd signs (Mesha, Mithuna, …) counted 1-based.
    pub const fn is_odd(self) -> bool {
        self.index() % 2 == 0
    }

    /// Sidereal longitude range `[start, end)` of the sign.
    pub fn range(self) -> (f64, f64) {
        let start = f64::from(self.index()) * RASHI_SPAN;
        (start, start + RASHI_SPAN)
    }
}

/// Degrees-minutes-seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u16,
    pub minutes: u8,
    pub seconds: f64,
}

/// Rashi lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RashiInfo {
    pub rashi: Rashi,
    pub rashi_index: u8,
    pub dms: Dms,
    /// Degrees within the sign, [0, 30).
    pub degrees_in_rashi: f64,
}

/// Longitude range `[start, end)` covered by a sign.
pub fn rashi_range(rashi: Rashi) -> (f64, f64) {
    rashi.range()
}

/// Convert DMS back to decimal degrees.
pub fn dms_to_deg(dms: &Dms) -> f64 {
    f64::from(dms.degrees) + f64::from(dms.minutes) / 60.0 + dms.seconds / 3600.0
}

const MICROARCSEC_PER_DEG: f64 = 3_600_000_000.0;

/// Convert decimal degrees to DMS. The sign of the input is dropped.
///
/// The angle is rounded to the nearest microarcsecond first, so `seconds`
/// always lies in `[0, 60)` and a value just below a minute boundary carries
/// into `minutes` (and `degrees`) instead of reading 59.99999…″.
pub fn deg_to_dms(deg: f64) -> Dms {
    let micro = (deg.abs() * MICROARCSEC_PER_DEG).round() as u64;
    Dms {
        degrees: (micro / 3_600_000_000) as u16,
        minutes: ((micro / 60_000_000) % 60) as u8,
        seconds: (micro % 60_000_000) as f64 / 1.0e6,
    }
}

/// Rashi containing a sidereal longitude. Boundary values (exact multiples
/// of 30°) belong to the sign that starts there.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let idx = segment_index(lon, RASHI_SPAN, 12);
    let degrees_in_rashi = (lon - f64::from(idx) * RASHI_SPAN).max(0.0);
    RashiInfo {
        rashi: ALL_RASHIS[idx as usize],
        rashi_index: idx,
        dms: deg_to_dms(degrees_in_rashi),
        degrees_in_rashi,
    }
}

/// Navamsa (D9) sign of a sidereal longitude.
///
/// Each sign is cut into nine parts of 3°20′; counting those parts from
/// Mesha around the whole zodiac gives the navamsa sign.
pub fn navamsa_rashi(sidereal_lon_deg: f64) -> Rashi {
    let part = segment_index(sidereal_lon_deg, RASHI_SPAN / 9.0, 108);
    Rashi::from_index(part % 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_order() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
            assert_eq!(Rashi::from_index(i as u8), *r);
        }
    }

    #[test]
    fn dms_carries_instead_of_sixty_seconds() {
        // A few hundredths of a microarcsecond below 10°30′.
        let d = deg_to_dms(10.5 - 1.0e-11);
        assert_eq!((d.degrees, d.minutes), (10, 30));
        assert_eq!(d.seconds, 0.0);

        // 3.6 microarcseconds below stays in the previous minute.
        let d = deg_to_dms(10.5 - 1.0e-9);
        assert_eq!((d.degrees, d.minutes), (10, 29));
        assert!(d.seconds < 60.0 && d.seconds > 59.999, "{}", d.seconds);

        // 59.99999999″ rounds up into the next degree.
        let d = deg_to_dms(12.0 + 59.0 / 60.0 + 59.999_999_99 / 3600.0);
        assert_eq!((d.degrees, d.minutes), (13, 0));
        assert_eq!(d.seconds, 0.0);

        for k in 0..10_000 {
            let d = deg_to_dms(f64::from(k) * 0.036_001_7);
            assert!((0.0..60.0).contains(&d.seconds), "{k}: {d:?}");
            assert!(d.minutes < 60, "{k}: {d:?}");
        }
    }

    #[test]
    fn dms_of_lahiri_reference() {
        // 23.853° = 23° 51′ 10.8″
        let d = deg_to_dms(23.853);
        assert_eq!((d.degrees, d.minutes), (23, 51));
        assert!((d.seconds - 10.8).abs() < 1e-6);
        assert!((dms_to_deg(&d) - 23.853).abs() < 1e-12);
    }

    #[test]
    fn cusp_goes_to_next_sign() {
        let info = rashi_from_longitude(30.0);
        assert_eq!(info.rashi, Rashi::Vrishabha);
        assert_eq!(info.degrees_in_rashi, 0.0);
    }

    #[test]
    fn just_below_cusp_stays() {
        assert_eq!(rashi_from_longitude(29.999).rashi, Rashi::Mesha);
    }

    #[test]
    fn wraps_negative_and_large() {
        assert_eq!(rashi_from_longitude(-1.0).rashi, Rashi::Meena);
        assert_eq!(rashi_from_longitude(725.0).rashi, Rashi::Mesha);
    }

    #[test]
    fn range_contains_lookups() {
        for r in ALL_RASHIS {
            let (start, end) = rashi_range(r);
            assert_eq!(rashi_from_longitude(start).rashi, r);
            assert_eq!(rashi_from_longitude((start + end) / 2.0).rashi, r);
        }
    }

    #[test]
    fn navamsa_starts() {
        // Fire signs start from Mesha, earth signs from Makara.
        assert_eq!(navamsa_rashi(0.0), Rashi::Mesha);
        assert_eq!(navamsa_rashi(30.0), Rashi::Makara);
        assert_eq!(navamsa_rashi(60.0), Rashi::Tula);
        assert_eq!(navamsa_rashi(90.0), Rashi::Karka);
        assert_eq!(navamsa_rashi(29.9), Rashi::Dhanu);
    }
}
