//! Dignities, friendships and natures of the grahas (BPHS).
//!
//! Everything here is a pure table lookup on sidereal longitudes; the
//! lunar nodes have no classical dignity and are reported as neutral.

use serde::{Deserialize, Serialize};

use crate::graha::{Graha, rashi_lord};
use crate::rashi::{RASHI_SPAN, Rashi, rashi_from_longitude};
use crate::util::normalize_360;

/// Sidereal longitude of deep exaltation.
pub const fn exaltation_degree(graha: Graha) -> Option<f64> {
    match graha {
        Graha::Surya => Some(10.0),
        Graha::Chandra => Some(33.0),
        Graha::Mangal => Some(298.0),
        Graha::Buddh => Some(165.0),
        Graha::Guru => Some(95.0),
        Graha::Shukra => Some(357.0),
        Graha::Shani => Some(200.0),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Sidereal longitude of deep debilitation, opposite the exaltation point.
pub fn debilitation_degree(graha: Graha) -> Option<f64> {
    exaltation_degree(graha).map(|e| normalize_360(e + 180.0))
}

/// Moolatrikone sign with its `[start, end)` degrees inside the sign.
pub const fn moolatrikone_range(graha: Graha) -> Option<(Rashi, f64, f64)> {
    match graha {
        Graha::Surya => Some((Rashi::Simha, 0.0, 20.0)),
        Graha::Chandra => Some((Rashi::Vrishabha, 4.0, 20.0)),
        Graha::Mangal => Some((Rashi::Mesha, 0.0, 12.0)),
        Graha::Buddh => Some((Rashi::Kanya, 16.0, 20.0)),
        Graha::Guru => Some((Rashi::Dhanu, 0.0, 10.0)),
        Graha::Shukra => Some((Rashi::Tula, 0.0, 15.0)),
        Graha::Shani => Some((Rashi::Kumbha, 0.0, 20.0)),
        Graha::Rahu | Graha::Ketu => None,
    }
}

/// Signs owned by a graha.
pub fn own_signs(graha: Graha) -> &'static [Rashi] {
    match graha {
        Graha::Surya => &[Rashi::Simha],
        Graha::Chandra => &[Rashi::Karka],
        Graha::Mangal => &[Rashi::Mesha, Rashi::Vrischika],
        Graha::Buddh => &[Rashi::Mithuna, Rashi::Kanya],
        Graha::Guru => &[Rashi::Dhanu, Rashi::Meena],
        Graha::Shukra => &[Rashi::Vrishabha, Rashi::Tula],
        Graha::Shani => &[Rashi::Makara, Rashi::Kumbha],
        Graha::Rahu | Graha::Ketu => &[],
    }
}

/// Permanent (natural) relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NaisargikaMaitri {
    Friend,
    Neutral,
    Enemy,
}

/// Natural relationship of `graha` towards `other`. Not symmetric.
pub const fn naisargika_maitri(graha: Graha, other: Graha) -> NaisargikaMaitri {
    use Graha::*;
    use NaisargikaMaitri::*;
    match (graha, other) {
        (Rahu | Ketu, _) | (_, Rahu | Ketu) => Neutral,
        (Surya, Chandra | Mangal | Guru) => Friend,
        (Surya, Shukra | Shani) => Enemy,
        (Chandra, Surya | Buddh) => Friend,
        (Mangal, Surya | Chandra | Guru) => Friend,
        (Mangal, Buddh) => Enemy,
        (Buddh, Surya | Shukra) => Friend,
        (Buddh, Chandra) => Enemy,
        (Guru, Surya | Chandra | Mangal) => Friend,
        (Guru, Buddh | Shukra) => Enemy,
        (Shukra, Buddh | Shani) => Friend,
        (Shukra, Surya | Chandra) => Enemy,
        (Shani, Buddh | Shukra) => Friend,
        (Shani, Surya | Chandra | Mangal) => Enemy,
        _ => Neutral,
    }
}

/// Temporary relationship from sign positions: grahas in the 2nd, 3rd,
/// 4th, 10th, 11th or 12th sign from each other are friends.
pub fn tatkalika_friend(graha_rashi: Rashi, other_rashi: Rashi) -> bool {
    let offset = (other_rashi.index() + 12 - graha_rashi.index()) % 12;
    matches!(offset, 1 | 2 | 3 | 9 | 10 | 11)
}

/// Dignity of a graha in a sign, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dignity {
    Exalted,
    Moolatrikone,
    OwnSign,
    AdhiMitra,
    Mitra,
    Sama,
    Shatru,
    AdhiShatru,
    Debilitated,
}

fn in_sign_of(point: Option<f64>, lon: f64) -> bool {
    point.is_some_and(|p| rashi_from_longitude(p).rashi == rashi_from_longitude(lon).rashi)
}

fn in_moolatrikone(graha: Graha, lon: f64) -> bool {
    let Some((sign, start, end)) = moolatrikone_range(graha) else {
        return false;
    };
    let info = rashi_from_longitude(lon);
    info.rashi == sign && info.degrees_in_rashi >= start && info.degrees_in_rashi < end
}

/// Fixed part of the dignity ladder shared by both friendship modes.
fn structural_dignity(graha: Graha, lon: f64) -> Option<Dignity> {
    if in_sign_of(exaltation_degree(graha), lon) {
        return Some(Dignity::Exalted);
    }
    if in_sign_of(debilitation_degree(graha), lon) {
        return Some(Dignity::Debilitated);
    }
    if in_moolatrikone(graha, lon) {
        return Some(Dignity::Moolatrikone);
    }
    if own_signs(graha).contains(&rashi_from_longitude(lon).rashi) {
        return Some(Dignity::OwnSign);
    }
    None
}

/// Dignity using natural friendship with the sign lord only.
///
/// Priority: exaltation, debilitation, moolatrikone, own sign, then the
/// natural relationship with the lord of the occupied sign.
pub fn dignity_in_rashi(graha: Graha, sidereal_lon: f64) -> Dignity {
    if !graha.is_sapta() {
        return Dignity::Sama;
    }
    if let Some(d) = structural_dignity(graha, sidereal_lon) {
        return d;
    }
    let lord = rashi_lord(rashi_from_longitude(sidereal_lon).rashi);
    match naisargika_maitri(graha, lord) {
        NaisargikaMaitri::Friend => Dignity::Mitra,
        NaisargikaMaitri::Neutral => Dignity::Sama,
        NaisargikaMaitri::Enemy => Dignity::Shatru,
    }
}

/// Dignity using compound (natural + temporary) friendship.
///
/// `sapta_lons` holds the sidereal longitudes of the seven classical grahas
/// in [`crate::graha::SAPTA_GRAHAS`] order; the sign lord's temporary
/// relationship is read from its own position.
pub fn compound_dignity_in_rashi(graha: Graha, sidereal_lon: f64, sapta_lons: &[f64; 7]) -> Dignity {
    if !graha.is_sapta() {
        return Dignity::Sama;
    }
    if let Some(d) = structural_dignity(graha, sidereal_lon) {
        return d;
    }
    let own = rashi_from_longitude(sidereal_lon).rashi;
    let lord = rashi_lord(own);
    let lord_rashi = rashi_from_longitude(sapta_lons[lord.index() as usize]).rashi;
    let temp_friend = tatkalika_friend(own, lord_rashi);
    match (naisargika_maitri(graha, lord), temp_friend) {
        (NaisargikaMaitri::Friend, true) => Dignity::AdhiMitra,
        (NaisargikaMaitri::Neutral, true) => Dignity::Mitra,
        (NaisargikaMaitri::Friend, false) | (NaisargikaMaitri::Enemy, true) => Dignity::Sama,
        (NaisargikaMaitri::Neutral, false) => Dignity::Shatru,
        (NaisargikaMaitri::Enemy, false) => Dignity::AdhiShatru,
    }
}

/// Benefic or malefic nature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeneficNature {
    Benefic,
    Malefic,
}

/// Natural nature. The Moon's real nature depends on its phase, see
/// [`moon_benefic_nature`].
pub const fn natural_benefic_malefic(graha: Graha) -> BeneficNature {
    match graha {
        Graha::Chandra | Graha::Buddh | Graha::Guru | Graha::Shukra => BeneficNature::Benefic,
        Graha::Surya | Graha::Mangal | Graha::Shani | Graha::Rahu | Graha::Ketu => {
            BeneficNature::Malefic
        }
    }
}

/// The Moon is benefic when at least 72° from the Sun.
pub fn moon_benefic_nature(moon_sun_elongation: f64) -> BeneficNature {
    let elong = normalize_360(moon_sun_elongation);
    let phase = if elong <= 180.0 { elong } else { 360.0 - elong };
    if phase >= 72.0 {
        BeneficNature::Benefic
    } else {
        BeneficNature::Malefic
    }
}

/// Nature in a specific chart: the Moon follows its phase and Mercury
/// follows the Moon.
pub fn chart_nature(graha: Graha, moon_sun_elongation: f64) -> BeneficNature {
    match graha {
        Graha::Chandra | Graha::Buddh => moon_benefic_nature(moon_sun_elongation),
        other => natural_benefic_malefic(other),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrahaGender {
    Male,
    Female,
    Neuter,
}

pub const fn graha_gender(graha: Graha) -> GrahaGender {
    match graha {
        Graha::Surya | Graha::Mangal | Graha::Guru => GrahaGender::Male,
        Graha::Chandra | Graha::Shukra => GrahaGender::Female,
        Graha::Buddh | Graha::Shani | Graha::Rahu | Graha::Ketu => GrahaGender::Neuter,
    }
}

/// Degrees of a longitude inside its sign.
pub(crate) fn degrees_in_sign(lon: f64) -> f64 {
    normalize_360(lon) % RASHI_SPAN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::SAPTA_GRAHAS;

    #[test]
    fn debilitation_opposes_exaltation() {
        for g in SAPTA_GRAHAS {
            let e = exaltation_degree(g).unwrap();
            let d = debilitation_degree(g).unwrap();
            assert!((normalize_360(d - e) - 180.0).abs() < 1e-12);
        }
        assert!(exaltation_degree(Graha::Rahu).is_none());
    }

    #[test]
    fn sun_dignities() {
        assert_eq!(dignity_in_rashi(Graha::Surya, 10.0), Dignity::Exalted);
        assert_eq!(dignity_in_rashi(Graha::Surya, 190.0), Dignity::Debilitated);
        assert_eq!(dignity_in_rashi(Graha::Surya, 125.0), Dignity::Moolatrikone);
        assert_eq!(dignity_in_rashi(Graha::Surya, 145.0), Dignity::OwnSign);
        // Karka, lord Moon: friend
        assert_eq!(dignity_in_rashi(Graha::Surya, 100.0), Dignity::Mitra);
        // Makara, lord Saturn: enemy
        assert_eq!(dignity_in_rashi(Graha::Surya, 280.0), Dignity::Shatru);
    }

    #[test]
    fn nodes_are_neutral() {
        assert_eq!(dignity_in_rashi(Graha::Rahu, 45.0), Dignity::Sama);
        assert_eq!(naisargika_maitri(Graha::Surya, Graha::Ketu), NaisargikaMaitri::Neutral);
    }

    #[test]
    fn friendship_is_directional() {
        assert_eq!(naisargika_maitri(Graha::Chandra, Graha::Buddh), NaisargikaMaitri::Friend);
        assert_eq!(naisargika_maitri(Graha::Buddh, Graha::Chandra), NaisargikaMaitri::Enemy);
    }

    #[test]
    fn compound_friendship() {
        // Sun in Karka (lord Moon, natural friend); Moon two signs later in Kanya.
        let mut lons = [0.0; 7];
        lons[0] = 100.0;
        lons[1] = 160.0;
        assert_eq!(compound_dignity_in_rashi(Graha::Surya, 100.0, &lons), Dignity::AdhiMitra);
        // Moon in the same sign as the Sun: temporary enemy.
        lons[1] = 105.0;
        assert_eq!(compound_dignity_in_rashi(Graha::Surya, 100.0, &lons), Dignity::Sama);
    }

    #[test]
    fn moon_phase_nature() {
        assert_eq!(moon_benefic_nature(10.0), BeneficNature::Malefic);
        assert_eq!(moon_benefic_nature(180.0), BeneficNature::Benefic);
        assert_eq!(moon_benefic_nature(300.0), BeneficNature::Malefic);
        assert_eq!(chart_nature(Graha::Buddh, 10.0), BeneficNature::Malefic);
        assert_eq!(chart_nature(Graha::Guru, 10.0), BeneficNature::Benefic);
    }
}
