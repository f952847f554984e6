//! Types for bhava (house) computation.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported house division systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BhavaSystem {
    /// Equal houses of 30° from the ascendant.
    Equal,
    /// Each sign is one house, the ascendant's sign being the first.
    WholeSign,
    /// Sripati (Porphyry): trisect the four quadrant arcs.
    #[default]
    Sripati,
    /// Placidus: trisect the semi-arcs in time.
    Placidus,
}

pub const ALL_BHAVA_SYSTEMS: [BhavaSystem; 4] = [
    BhavaSystem::Equal,
    BhavaSystem::WholeSign,
    BhavaSystem::Sripati,
    BhavaSystem::Placidus,
];

impl BhavaSystem {
    pub const fn all() -> &'static [BhavaSystem] {
        &ALL_BHAVA_SYSTEMS
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::WholeSign => "Whole Sign",
            Self::Sripati => "Sripati",
            Self::Placidus => "Placidus",
        }
    }

    /// Whether the system is undefined close to the poles.
    ///
    /// Latitude-dependent systems fail for |lat| > 66.5 degrees.
    pub const fn latitude_dependent(self) -> bool {
        matches!(self, Self::Placidus)
    }
}

impl Display for BhavaSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BhavaSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "equal" => Ok(Self::Equal),
            "wholesign" | "whole" => Ok(Self::WholeSign),
            "sripati" | "porphyry" => Ok(Self::Sripati),
            "placidus" => Ok(Self::Placidus),
            _ => Err(format!("unknown house system '{s}'")),
        }
    }
}

/// A single bhava (house).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bhava {
    /// House number, 1-12.
    pub number: u8,
    /// Sidereal longitude of the opening cusp, [0, 360).
    pub cusp_deg: f64,
    /// Sidereal longitude of the next house's cusp, [0, 360).
    pub end_deg: f64,
}

impl Bhava {
    /// Forward arc covered by the house.
    pub fn span_deg(&self) -> f64 {
        crate::util::arc_forward(self.cusp_deg, self.end_deg)
    }
}

/// Twelve houses plus the angles they were derived from, all sidereal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BhavaResult {
    pub system: BhavaSystem,
    /// `bhavas[0]` is house 1.
    pub bhavas: [Bhava; 12],
    pub lagna_deg: f64,
    pub mc_deg: f64,
}

impl BhavaResult {
    pub fn cusps(&self) -> [f64; 12] {
        self.bhavas.map(|b| b.cusp_deg)
    }
}
