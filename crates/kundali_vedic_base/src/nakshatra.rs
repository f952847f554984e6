//! Nakshatra (lunar mansion) and pada lookup.
//!
//! 27 equal nakshatras of 13°20′ from Ashwini at sidereal 0°, each split
//! into four padas of 3°20′.

use serde::{Deserialize, Serialize};

use crate::util::{normalize_360, segment_index};

/// Span of one nakshatra: 13°20′.
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// Span of one pada: 3°20′.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

pub const ALL_NAKSHATRAS: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini = 0).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Sidereal longitude range `[start, end)`.
    pub fn range(self) -> (f64, f64) {
        let start = f64::from(self.index()) * NAKSHATRA_SPAN;
        (start, start + NAKSHATRA_SPAN)
    }
}

/// Nakshatra lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NakshatraInfo {
    pub nakshatra: Nakshatra,
    pub nakshatra_index: u8,
    /// Pada 1–4.
    pub pada: u8,
    /// Degrees elapsed inside the nakshatra, [0, 13.333…).
    pub degrees_in_nakshatra: f64,
    pub degrees_in_pada: f64,
}

impl NakshatraInfo {
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub fn elapsed_fraction(&self) -> f64 {
        (self.degrees_in_nakshatra / NAKSHATRA_SPAN).clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Nakshatra and pada containing a sidereal longitude.
///
/// A longitude exactly on a nakshatra or pada boundary belongs to the
/// segment that starts there.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let idx = segment_index(lon, NAKSHATRA_SPAN, 27);
    let degrees_in_nakshatra = (lon - f64::from(idx) * NAKSHATRA_SPAN).max(0.0);
    let pada_idx = segment_index(degrees_in_nakshatra, PADA_SPAN, 4);
    let degrees_in_pada = (degrees_in_nakshatra - f64::from(pada_idx) * PADA_SPAN).max(0.0);
    NakshatraInfo {
        nakshatra: ALL_NAKSHATRAS[idx as usize],
        nakshatra_index: idx,
        pada: pada_idx + 1,
        degrees_in_nakshatra,
        degrees_in_pada,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_of_zodiac() {
        let info = nakshatra_from_longitude(0.0);
        assert_eq!(info.nakshatra, Nakshatra::Ashwini);
        assert_eq!(info.pada, 1);
    }

    #[test]
    fn rohini_boundary_goes_up() {
        // Rohini starts at exactly 40°.
        let info = nakshatra_from_longitude(40.0);
        assert_eq!(info.nakshatra, Nakshatra::Rohini);
        assert_eq!(info.pada, 1);
        assert!(info.degrees_in_nakshatra < 1e-9);
    }

    #[test]
    fn pada_boundaries() {
        let start = Nakshatra::Magha.range().0;
        for p in 0..4u8 {
            let info = nakshatra_from_longitude(start + f64::from(p) * PADA_SPAN);
            assert_eq!(info.nakshatra, Nakshatra::Magha);
            assert_eq!(info.pada, p + 1);
        }
    }

    #[test]
    fn end_of_revati() {
        let info = nakshatra_from_longitude(359.9999);
        assert_eq!(info.nakshatra, Nakshatra::Revati);
        assert_eq!(info.pada, 4);
    }

    #[test]
    fn elapsed_fraction_midpoint() {
        let (start, end) = Nakshatra::Chitra.range();
        let info = nakshatra_from_longitude((start + end) / 2.0);
        assert!((info.elapsed_fraction() - 0.5).abs() < 1e-12);
    }
}
