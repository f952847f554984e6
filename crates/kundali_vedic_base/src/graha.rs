//! The nine grahas, their mapping to ephemeris bodies, and the day/hour
//! lordships used by the temporal strength and muhurta calculations.

use std::fmt::{Display, Formatter};

use kundali_core::Body;
use serde::{Deserialize, Serialize};

use crate::rashi::Rashi;

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// The 7 classical grahas, without the lunar nodes.
pub const SAPTA_GRAHAS: [Graha; 7] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
];

/// Chaldean order, slowest to fastest. Successive planetary hours step
/// through it.
const CHALDEAN_ORDER: [Graha; 7] = [
    Graha::Shani,
    Graha::Guru,
    Graha::Mangal,
    Graha::Surya,
    Graha::Shukra,
    Graha::Buddh,
    Graha::Chandra,
];

impl Graha {
    /// Sanskrit name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    pub const fn english_name(self) -> &'static str {
        self.body().name()
    }

    /// 0-based index in [`ALL_GRAHAS`].
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Ephemeris body that supplies this graha's position.
    pub const fn body(self) -> Body {
        match self {
            Self::Surya => Body::Sun,
            Self::Chandra => Body::Moon,
            Self::Mangal => Body::Mars,
            Self::Buddh => Body::Mercury,
            Self::Guru => Body::Jupiter,
            Self::Shukra => Body::Venus,
            Self::Shani => Body::Saturn,
            Self::Rahu => Body::Rahu,
            Self::Ketu => Body::Ketu,
        }
    }

    pub const fn from_body(body: Body) -> Self {
        match body {
            Body::Sun => Self::Surya,
            Body::Moon => Self::Chandra,
            Body::Mars => Self::Mangal,
            Body::Mercury => Self::Buddh,
            Body::Jupiter => Self::Guru,
            Body::Venus => Self::Shukra,
            Body::Saturn => Self::Shani,
            Body::Rahu => Self::Rahu,
            Body::Ketu => Self::Ketu,
        }
    }

    pub const fn is_sapta(self) -> bool {
        (self as u8) < 7
    }
}

impl Display for Graha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lord of a rashi.
pub const fn rashi_lord(rashi: Rashi) -> Graha {
    match rashi {
        Rashi::Mesha | Rashi::Vrischika => Graha::Mangal,
        Rashi::Vrishabha | Rashi::Tula => Graha::Shukra,
        Rashi::Mithuna | Rashi::Kanya => Graha::Buddh,
        Rashi::Karka => Graha::Chandra,
        Rashi::Simha => Graha::Surya,
        Rashi::Dhanu | Rashi::Meena => Graha::Guru,
        Rashi::Makara | Rashi::Kumbha => Graha::Shani,
    }
}

/// Lord of a weekday, 0 = Sunday … 6 = Saturday.
pub const fn vaar_lord(weekday: u8) -> Graha {
    match weekday % 7 {
        0 => Graha::Surya,
        1 => Graha::Chandra,
        2 => Graha::Mangal,
        3 => Graha::Buddh,
        4 => Graha::Guru,
        5 => Graha::Shukra,
        _ => Graha::Shani,
    }
}

/// Lord of the `hora_index`-th planetary hour counted from sunrise on
/// `weekday` (0 = Sunday). The first hour belongs to the day lord.
pub fn hora_lord(weekday: u8, hora_index: u32) -> Graha {
    let day_lord = vaar_lord(weekday);
    let start = CHALDEAN_ORDER
        .iter()
        .position(|g| *g == day_lord)
        .unwrap_or(0);
    CHALDEAN_ORDER[(start + hora_index as usize) % 7]
}

#[cfg(test)]
mod tests {
    use super::*;
    use kundali_core::ALL_BODIES;

    #[test]
    fn body_mapping_roundtrips() {
        for b in ALL_BODIES {
            assert_eq!(Graha::from_body(b).body(), b);
        }
        for (i, g) in ALL_GRAHAS.iter().enumerate() {
            assert_eq!(g.index() as usize, i);
        }
    }

    #[test]
    fn sapta_excludes_nodes() {
        assert!(SAPTA_GRAHAS.iter().all(|g| g.is_sapta()));
        assert!(!Graha::Rahu.is_sapta());
        assert!(!Graha::Ketu.is_sapta());
    }

    #[test]
    fn lords_of_signs() {
        assert_eq!(rashi_lord(Rashi::Simha), Graha::Surya);
        assert_eq!(rashi_lord(Rashi::Karka), Graha::Chandra);
        assert_eq!(rashi_lord(Rashi::Kumbha), Graha::Shani);
        assert_eq!(rashi_lord(Rashi::Meena), Graha::Guru);
    }

    #[test]
    fn hora_sequence_reaches_next_day_lord() {
        // After 24 hours the sequence lands on the next weekday's lord.
        for wd in 0..7u8 {
            assert_eq!(hora_lord(wd, 0), vaar_lord(wd));
            assert_eq!(hora_lord(wd, 24), vaar_lord(wd + 1));
        }
        // Sunday: Sun, Venus, Mercury, Moon, Saturn …
        assert_eq!(hora_lord(0, 1), Graha::Shukra);
        assert_eq!(hora_lord(0, 3), Graha::Chandra);
    }
}
