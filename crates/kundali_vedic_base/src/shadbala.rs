//! Shadbala (six-fold planetary strength) for the seven classical grahas.
//!
//! All values are in shashtiamsas (60ths of a rupa). The six components:
//! 1. Positional (sthana): uchcha + rashi dignity + ojhayugma + kendradi + drekkana
//! 2. Directional (dig)
//! 3. Temporal (kala): nathonnatha + paksha + tribhaga + vara + hora + ayana
//! 4. Motional (cheshta)
//! 5. Natural (naisargika)
//! 6. Aspectual (drik)
//!
//! The composite is a fixed weighted sum and is reported against its
//! theoretical maximum.

use kundali_frames::{ecliptic_to_equatorial, mean_obliquity_deg};
use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::drishti::graha_drishti;
use crate::graha::{Graha, SAPTA_GRAHAS, hora_lord, vaar_lord};
use crate::graha_relationships::{
    BeneficNature, Dignity, GrahaGender, chart_nature, compound_dignity_in_rashi,
    degrees_in_sign, exaltation_degree, graha_gender,
};
use crate::rashi::{navamsa_rashi, rashi_from_longitude};
use crate::util::{arc_forward, normalize_360, separation};

/// Natural strength, [`SAPTA_GRAHAS`] order.
pub const NAISARGIKA_BALA: [f64; 7] = [60.0, 51.43, 17.14, 25.71, 34.29, 42.86, 8.57];

/// House of maximum directional strength.
/// Sun=10, Moon=4, Mars=10, Mercury=1, Jupiter=1, Venus=4, Saturn=7.
pub const DIG_BALA_BHAVA: [u8; 7] = [10, 4, 10, 1, 1, 4, 7];

/// Daily motion (deg/day) that earns full motional strength.
pub const MAX_SPEED: [f64; 7] = [1.0, 15.0, 0.8, 2.2, 0.25, 1.6, 0.13];

/// Weights of positional, directional, temporal, motional, natural and
/// aspectual strength in the composite.
pub const COMPONENT_WEIGHTS: [f64; 6] = [1.0; 6];

/// Largest value each component can take, same order as the weights.
pub const COMPONENT_MAXIMA: [f64; 6] = [195.0, 60.0, 345.0, 60.0, 60.0, 60.0];

/// Percentage at or above which a graha is classed strong.
pub const STRONG_PERCENT: f64 = 55.0;

/// Percentage below which a graha is classed weak.
pub const WEAK_PERCENT: f64 = 40.0;

/// Points for the dignity of the occupied sign.
fn dignity_points(dignity: Dignity) -> f64 {
    match dignity {
        Dignity::Exalted => 30.0,
        Dignity::Moolatrikone => 22.5,
        Dignity::OwnSign => 20.0,
        Dignity::AdhiMitra => 15.0,
        Dignity::Mitra => 10.0,
        Dignity::Sama => 7.5,
        Dignity::Shatru => 5.0,
        Dignity::AdhiShatru => 2.5,
        Dignity::Debilitated => 1.25,
    }
}

// ---------------------------------------------------------------------------
// Positional
// ---------------------------------------------------------------------------

/// Uchcha bala: 60 at deep exaltation falling linearly to 0 at debilitation.
pub fn uchcha_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    exaltation_degree(graha).map_or(0.0, |e| 60.0 * (1.0 - separation(sidereal_lon, e) / 180.0))
}

/// Ojhayugma bala: the Moon and Venus gain in even signs, the others in odd
/// ones; 15 each for the rashi and the navamsa.
pub fn ojhayugma_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    let wants_odd = graha_gender(graha) != GrahaGender::Female;
    let rashi_odd = rashi_from_longitude(sidereal_lon).rashi.is_odd();
    let navamsa_odd = navamsa_rashi(sidereal_lon).is_odd();
    let mut score = 0.0;
    if rashi_odd == wants_odd {
        score += 15.0;
    }
    if navamsa_odd == wants_odd {
        score += 15.0;
    }
    score
}

/// Kendradi bala: kendra 60, panaphara 30, apoklima 15.
pub fn kendradi_bala(house: u8) -> f64 {
    match house {
        1 | 4 | 7 | 10 => 60.0,
        2 | 5 | 8 | 11 => 30.0,
        3 | 6 | 9 | 12 => 15.0,
        _ => 0.0,
    }
}

/// Drekkana bala: male grahas in the first decanate, female in the second,
/// neuter in the third earn 15.
pub fn drekkana_bala(graha: Graha, sidereal_lon: f64) -> f64 {
    let decanate = (degrees_in_sign(sidereal_lon) / 10.0).floor().min(2.0) as u8;
    match (graha_gender(graha), decanate) {
        (GrahaGender::Male, 0) | (GrahaGender::Female, 1) | (GrahaGender::Neuter, 2) => 15.0,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionalBreakdown {
    pub uchcha: f64,
    pub dignity: f64,
    pub ojhayugma: f64,
    pub kendradi: f64,
    pub drekkana: f64,
}

impl PositionalBreakdown {
    pub fn total(&self) -> f64 {
        self.uchcha + self.dignity + self.ojhayugma + self.kendradi + self.drekkana
    }
}

// ---------------------------------------------------------------------------
// Directional
// ---------------------------------------------------------------------------

/// Dig bala: 60 in the strongest house, losing 10 per house of distance.
pub fn dig_bala(graha: Graha, house: u8) -> f64 {
    if !graha.is_sapta() || !(1..=12).contains(&house) {
        return 0.0;
    }
    let best = DIG_BALA_BHAVA[graha.index() as usize];
    let diff = (i16::from(house) - i16::from(best)).unsigned_abs();
    let dist = diff.min(12 - diff).min(6);
    60.0 * (1.0 - f64::from(dist) / 6.0)
}

// ---------------------------------------------------------------------------
// Temporal
// ---------------------------------------------------------------------------

/// Time-of-day facts a chart implies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalContext {
    /// Sun above the horizon: on the ecliptic half that runs forward from
    /// the descendant to the ascendant, whatever the house system.
    pub is_daytime: bool,
    /// Elapsed fraction of the current day or night, [0, 1].
    pub fraction: f64,
    /// Weekday counted from sunrise, 0 = Sunday.
    pub weekday: u8,
    /// Planetary hour since sunrise, 0–23.
    pub hora_index: u8,
    pub moon_sun_elongation: f64,
}

impl TemporalContext {
    pub fn from_chart(chart: &Chart) -> Self {
        let sun = chart.longitude(Graha::Surya);
        let asc = chart.lagna_deg();
        let desc = normalize_360(asc + 180.0);
        let is_daytime = arc_forward(sun, asc) < 180.0;

        let fraction = if is_daytime {
            ratio(arc_forward(sun, asc), arc_forward(desc, asc))
        } else {
            ratio(arc_forward(sun, desc), arc_forward(asc, desc))
        };

        let offset = chart.location.utc_offset_hours;
        let mut weekday = chart.instant.local_weekday(offset);
        // Before sunrise the previous civil day's lord still rules.
        if !is_daytime && chart.instant.to_local(offset).hour < 12 {
            weekday = (weekday + 6) % 7;
        }
        let hora_in_half = (fraction * 12.0).floor().clamp(0.0, 11.0) as u8;
        let hora_index = if is_daytime { hora_in_half } else { 12 + hora_in_half };

        Self {
            is_daytime,
            fraction,
            weekday,
            hora_index,
            moon_sun_elongation: chart.moon_sun_elongation(),
        }
    }

    /// Closeness to local midday: 1 at noon, 0.5 at sunrise and sunset, 0 at
    /// midnight.
    pub fn unnata(&self) -> f64 {
        let from_mid = (self.fraction - 0.5).abs();
        if self.is_daytime { 1.0 - from_mid } else { from_mid }
    }
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { (part / whole).clamp(0.0, 1.0) } else { 0.0 }
}

/// Nathonnatha bala: Sun, Jupiter and Venus are strong towards midday,
/// Moon, Mars and Saturn towards midnight, Mercury always.
pub fn nathonnatha_bala(graha: Graha, ctx: &TemporalContext) -> f64 {
    match graha {
        Graha::Surya | Graha::Guru | Graha::Shukra => 60.0 * ctx.unnata(),
        Graha::Chandra | Graha::Mangal | Graha::Shani => 60.0 * (1.0 - ctx.unnata()),
        Graha::Buddh => 60.0,
        Graha::Rahu | Graha::Ketu => 0.0,
    }
}

/// Paksha bala: benefics grow with the Moon's light, malefics wane with it.
/// The Moon always takes the benefic score.
pub fn paksha_bala(graha: Graha, moon_sun_elongation: f64) -> f64 {
    if !graha.is_sapta() {
        return 0.0;
    }
    let benefic_score = separation(moon_sun_elongation, 0.0) / 3.0;
    let nature = if graha == Graha::Chandra {
        BeneficNature::Benefic
    } else {
        chart_nature(graha, moon_sun_elongation)
    };
    match nature {
        BeneficNature::Benefic => benefic_score,
        BeneficNature::Malefic => 60.0 - benefic_score,
    }
}

/// Tribhaga bala: the day's thirds belong to Mercury, Sun and Saturn, the
/// night's to Moon, Venus and Mars. Jupiter always gets 60.
pub fn tribhaga_bala(graha: Graha, ctx: &TemporalContext) -> f64 {
    if graha == Graha::Guru {
        return 60.0;
    }
    let third = (ctx.fraction * 3.0).floor().clamp(0.0, 2.0) as usize;
    let rulers = if ctx.is_daytime {
        [Graha::Buddh, Graha::Surya, Graha::Shani]
    } else {
        [Graha::Chandra, Graha::Shukra, Graha::Mangal]
    };
    if rulers[third] == graha { 60.0 } else { 0.0 }
}

/// Vara bala: 45 for the lord of the weekday.
pub fn vara_bala(graha: Graha, weekday: u8) -> f64 {
    if vaar_lord(weekday) == graha { 45.0 } else { 0.0 }
}

/// Hora bala: 60 for the lord of the planetary hour.
pub fn hora_bala(graha: Graha, weekday: u8, hora_index: u8) -> f64 {
    if hora_lord(weekday, u32::from(hora_index)) == graha { 60.0 } else { 0.0 }
}

/// Ayana bala from declination: benefics gain north, malefics south.
pub fn ayana_bala(graha: Graha, declination_deg: f64, moon_sun_elongation: f64) -> f64 {
    if !graha.is_sapta() {
        return 0.0;
    }
    let kranti = declination_deg.clamp(-24.0, 24.0);
    match chart_nature(graha, moon_sun_elongation) {
        BeneficNature::Benefic => (24.0 + kranti) / 48.0 * 60.0,
        BeneficNature::Malefic => (24.0 - kranti) / 48.0 * 60.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalBreakdown {
    pub nathonnatha: f64,
    pub paksha: f64,
    pub tribhaga: f64,
    pub vara: f64,
    pub hora: f64,
    pub ayana: f64,
}

impl TemporalBreakdown {
    pub fn total(&self) -> f64 {
        self.nathonnatha + self.paksha + self.tribhaga + self.vara + self.hora + self.ayana
    }
}

// ---------------------------------------------------------------------------
// Motional, natural, aspectual
// ---------------------------------------------------------------------------

/// Cheshta bala for the five star-planets: 60 when retrograde, otherwise
/// the speed as a share of [`MAX_SPEED`]. The Sun and Moon are handled by
/// the scorer (ayana and paksha respectively).
pub fn cheshta_bala(graha: Graha, speed_deg_per_day: f64) -> f64 {
    if !graha.is_sapta() || matches!(graha, Graha::Surya | Graha::Chandra) {
        return 0.0;
    }
    if speed_deg_per_day < 0.0 {
        60.0
    } else {
        (speed_deg_per_day / MAX_SPEED[graha.index() as usize] * 60.0).min(60.0)
    }
}

pub fn naisargika_bala(graha: Graha) -> f64 {
    if graha.is_sapta() {
        NAISARGIKA_BALA[graha.index() as usize]
    } else {
        0.0
    }
}

/// Drik bala: 30 plus a quarter of the net benefic aspect received from the
/// other classical grahas, clamped to [0, 60].
pub fn drik_bala(graha: Graha, sapta_lons: &[f64; 7], moon_sun_elongation: f64) -> f64 {
    if !graha.is_sapta() {
        return 0.0;
    }
    let target = sapta_lons[graha.index() as usize];
    let mut net = 0.0;
    for src in SAPTA_GRAHAS {
        if src == graha {
            continue;
        }
        let v = graha_drishti(src, sapta_lons[src.index() as usize], target);
        match chart_nature(src, moon_sun_elongation) {
            BeneficNature::Benefic => net += v,
            BeneficNature::Malefic => net -= v,
        }
    }
    (30.0 + net / 4.0).clamp(0.0, 60.0)
}

// ---------------------------------------------------------------------------
// Composite
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthClass {
    Strong,
    Moderate,
    Weak,
}

impl StrengthClass {
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= STRONG_PERCENT {
            Self::Strong
        } else if pct < WEAK_PERCENT {
            Self::Weak
        } else {
            Self::Moderate
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthComponents {
    pub positional: f64,
    pub directional: f64,
    pub temporal: f64,
    pub motional: f64,
    pub natural: f64,
    pub aspectual: f64,
}

impl StrengthComponents {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.positional,
            self.directional,
            self.temporal,
            self.motional,
            self.natural,
            self.aspectual,
        ]
    }
}

/// Strength of one graha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthScore {
    pub graha: Graha,
    pub components: StrengthComponents,
    pub positional_detail: PositionalBreakdown,
    pub temporal_detail: TemporalBreakdown,
    pub composite: f64,
    pub maximum: f64,
    pub percentage: f64,
    pub class: StrengthClass,
}

/// Scores the seven classical grahas of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadbalaScorer {
    weights: [f64; 6],
}

impl Default for ShadbalaScorer {
    fn default() -> Self {
        Self {
            weights: COMPONENT_WEIGHTS,
        }
    }
}

impl ShadbalaScorer {
    /// Composite ceiling for the configured weights.
    pub fn maximum(&self) -> f64 {
        self.weights.iter().zip(COMPONENT_MAXIMA).map(|(w, m)| w * m).sum()
    }

    /// One score per classical graha, [`SAPTA_GRAHAS`] order.
    pub fn score(&self, chart: &Chart) -> Vec<StrengthScore> {
        let ctx = TemporalContext::from_chart(chart);
        let lons = chart.sapta_longitudes();
        let obliquity = mean_obliquity_deg(chart.instant.centuries_tt());
        let maximum = self.maximum();

        SAPTA_GRAHAS
            .iter()
            .map(|&graha| {
                let p = chart.placement(graha);
                let lon = p.sidereal_longitude_deg;
                let declination = ecliptic_to_equatorial(
                    p.position.longitude_deg,
                    p.position.latitude_deg,
                    obliquity,
                )
                .dec_deg;

                let positional_detail = PositionalBreakdown {
                    uchcha: uchcha_bala(graha, lon),
                    dignity: dignity_points(compound_dignity_in_rashi(graha, lon, &lons)),
                    ojhayugma: ojhayugma_bala(graha, lon),
                    kendradi: kendradi_bala(p.house),
                    drekkana: drekkana_bala(graha, lon),
                };
                let temporal_detail = TemporalBreakdown {
                    nathonnatha: nathonnatha_bala(graha, &ctx),
                    paksha: paksha_bala(graha, ctx.moon_sun_elongation),
                    tribhaga: tribhaga_bala(graha, &ctx),
                    vara: vara_bala(graha, ctx.weekday),
                    hora: hora_bala(graha, ctx.weekday, ctx.hora_index),
                    ayana: ayana_bala(graha, declination, ctx.moon_sun_elongation),
                };
                let motional = match graha {
                    Graha::Surya => temporal_detail.ayana,
                    Graha::Chandra => temporal_detail.paksha,
                    _ => cheshta_bala(graha, p.position.speed_deg_per_day),
                };

                let components = StrengthComponents {
                    positional: positional_detail.total(),
                    directional: dig_bala(graha, p.house),
                    temporal: temporal_detail.total(),
                    motional,
                    natural: naisargika_bala(graha),
                    aspectual: drik_bala(graha, &lons, ctx.moon_sun_elongation),
                };
                let composite: f64 = components
                    .as_array()
                    .iter()
                    .zip(self.weights)
                    .map(|(c, w)| c * w)
                    .sum();
                let percentage = composite / maximum * 100.0;

                StrengthScore {
                    graha,
                    components,
                    positional_detail,
                    temporal_detail,
                    composite,
                    maximum,
                    percentage,
                    class: StrengthClass::from_percentage(percentage),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uchcha_extremes() {
        assert!((uchcha_bala(Graha::Surya, 10.0) - 60.0).abs() < 1e-12);
        assert!(uchcha_bala(Graha::Surya, 190.0).abs() < 1e-12);
        assert!((uchcha_bala(Graha::Surya, 100.0) - 30.0).abs() < 1e-12);
        assert_eq!(uchcha_bala(Graha::Rahu, 10.0), 0.0);
    }

    #[test]
    fn dig_bala_peaks_in_its_house() {
        assert_eq!(dig_bala(Graha::Surya, 10), 60.0);
        assert_eq!(dig_bala(Graha::Surya, 4), 0.0);
        assert!((dig_bala(Graha::Shani, 1) - 0.0).abs() < 1e-12);
        assert!((dig_bala(Graha::Shani, 9) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn ojhayugma_by_gender() {
        // 0° Mesha: odd sign, Mesha navamsa.
        assert_eq!(ojhayugma_bala(Graha::Surya, 0.0), 30.0);
        assert_eq!(ojhayugma_bala(Graha::Shukra, 0.0), 0.0);
        // 30° Vrishabha: even sign, Makara navamsa (even).
        assert_eq!(ojhayugma_bala(Graha::Chandra, 30.0), 30.0);
    }

    #[test]
    fn drekkana_by_gender() {
        assert_eq!(drekkana_bala(Graha::Guru, 5.0), 15.0);
        assert_eq!(drekkana_bala(Graha::Shukra, 15.0), 15.0);
        assert_eq!(drekkana_bala(Graha::Shani, 25.0), 15.0);
        assert_eq!(drekkana_bala(Graha::Shani, 5.0), 0.0);
    }

    #[test]
    fn paksha_full_and_new_moon() {
        assert!((paksha_bala(Graha::Chandra, 180.0) - 60.0).abs() < 1e-12);
        assert!(paksha_bala(Graha::Chandra, 0.0).abs() < 1e-12);
        assert!((paksha_bala(Graha::Shani, 0.0) - 60.0).abs() < 1e-12);
        assert!((paksha_bala(Graha::Guru, 180.0) - 60.0).abs() < 1e-12);
    }

    #[test]
    fn cheshta_rules() {
        assert_eq!(cheshta_bala(Graha::Mangal, -0.1), 60.0);
        assert!((cheshta_bala(Graha::Mangal, 0.4) - 30.0).abs() < 1e-12);
        assert_eq!(cheshta_bala(Graha::Guru, 5.0), 60.0);
        assert_eq!(cheshta_bala(Graha::Surya, 1.0), 0.0);
    }

    #[test]
    fn drik_is_bounded() {
        let lons = [0.0, 180.0, 90.0, 270.0, 120.0, 240.0, 300.0];
        for g in SAPTA_GRAHAS {
            let d = drik_bala(g, &lons, 180.0);
            assert!((0.0..=60.0).contains(&d), "{g}: {d}");
        }
    }

    #[test]
    fn classification_cutoffs() {
        assert_eq!(StrengthClass::from_percentage(55.0), StrengthClass::Strong);
        assert_eq!(StrengthClass::from_percentage(54.99), StrengthClass::Moderate);
        assert_eq!(StrengthClass::from_percentage(40.0), StrengthClass::Moderate);
        assert_eq!(StrengthClass::from_percentage(39.99), StrengthClass::Weak);
    }

    #[test]
    fn maximum_is_780_with_unit_weights() {
        assert!((ShadbalaScorer::default().maximum() - 780.0).abs() < 1e-12);
    }

    #[test]
    fn temporal_maxima_hold() {
        for fraction in [0.0, 0.2, 0.5, 0.9, 1.0] {
            for is_daytime in [true, false] {
                let ctx = TemporalContext {
                    is_daytime,
                    fraction,
                    weekday: 3,
                    hora_index: 5,
                    moon_sun_elongation: 100.0,
                };
                for g in SAPTA_GRAHAS {
                    let n = nathonnatha_bala(g, &ctx);
                    let t = tribhaga_bala(g, &ctx);
                    assert!((0.0..=60.0).contains(&n) && (0.0..=60.0).contains(&t));
                }
            }
        }
    }
}
