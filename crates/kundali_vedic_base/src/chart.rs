//! Chart assembly: ephemeris positions, sidereal conversion and houses.

use kundali_core::{Body, BodyPosition, Ephemeris};
use kundali_time::{BirthMoment, GeoLocation, Instant, TimePrecision};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ayanamsha::{AyanamshaSystem, ayanamsha_deg};
use crate::bhava::{bhava_for_longitude, compute_bhavas, cusps_are_monotonic};
use crate::bhava_types::{BhavaResult, BhavaSystem};
use crate::error::VedicError;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::nakshatra::{NakshatraInfo, nakshatra_from_longitude};
use crate::rashi::{RashiInfo, rashi_from_longitude};
use crate::util::normalize_360;

/// Frame choices for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub ayanamsha: AyanamshaSystem,
    pub house_system: BhavaSystem,
}

/// Where one graha sits in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrahaPlacement {
    pub graha: Graha,
    /// Tropical position as returned by the ephemeris.
    pub position: BodyPosition,
    pub sidereal_longitude_deg: f64,
    pub rashi: RashiInfo,
    pub nakshatra: NakshatraInfo,
    /// House number 1–12.
    pub house: u8,
    pub retrograde: bool,
}

/// A fully resolved sidereal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub instant: Instant,
    pub location: GeoLocation,
    pub time_precision: TimePrecision,
    pub ayanamsha: AyanamshaSystem,
    pub ayanamsha_deg: f64,
    pub houses: BhavaResult,
    pub lagna: RashiInfo,
    /// One entry per graha in [`ALL_GRAHAS`] order.
    pub grahas: [GrahaPlacement; 9],
}

impl Chart {
    pub fn placement(&self, graha: Graha) -> &GrahaPlacement {
        &self.grahas[graha.index() as usize]
    }

    /// Sidereal longitude of a graha.
    pub fn longitude(&self, graha: Graha) -> f64 {
        self.placement(graha).sidereal_longitude_deg
    }

    /// Sidereal longitude of the ephemeris body behind a graha.
    pub fn body_longitude(&self, body: Body) -> f64 {
        self.longitude(Graha::from_body(body))
    }

    pub fn lagna_deg(&self) -> f64 {
        self.houses.lagna_deg
    }

    pub fn cusps(&self) -> [f64; 12] {
        self.houses.cusps()
    }

    /// Sidereal longitudes of the seven classical grahas.
    pub fn sapta_longitudes(&self) -> [f64; 7] {
        std::array::from_fn(|i| self.grahas[i].sidereal_longitude_deg)
    }

    /// Moon's elongation east of the Sun, [0, 360).
    pub fn moon_sun_elongation(&self) -> f64 {
        normalize_360(self.longitude(Graha::Chandra) - self.longitude(Graha::Surya))
    }
}

/// Sidereal longitude of one body, the primitive used by searches.
pub fn sidereal_longitude(
    ephemeris: &dyn Ephemeris,
    instant: Instant,
    body: Body,
    system: AyanamshaSystem,
) -> Result<f64, VedicError> {
    let tropical = ephemeris.longitude(instant, body)?;
    Ok(normalize_360(tropical - ayanamsha_deg(system, instant)))
}

/// Builds [`Chart`]s against one ephemeris.
pub struct ChartBuilder<'a> {
    ephemeris: &'a dyn Ephemeris,
    config: ChartConfig,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(ephemeris: &'a dyn Ephemeris, config: ChartConfig) -> Self {
        Self { ephemeris, config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Chart for a resolved birth moment, carrying its time precision.
    pub fn build_for_birth(&self, birth: &BirthMoment) -> Result<Chart, VedicError> {
        self.build_with_precision(birth.instant, &birth.location, birth.precision)
    }

    /// Chart for an instant whose time is known exactly.
    pub fn build(&self, instant: Instant, location: &GeoLocation) -> Result<Chart, VedicError> {
        self.build_with_precision(instant, location, TimePrecision::Exact)
    }

    fn build_with_precision(
        &self,
        instant: Instant,
        location: &GeoLocation,
        time_precision: TimePrecision,
    ) -> Result<Chart, VedicError> {
        location.validate()?;
        let aya = ayanamsha_deg(self.config.ayanamsha, instant);
        let houses = compute_bhavas(instant, location, self.config.house_system, aya)?;
        let cusps = houses.cusps();
        if !cusps_are_monotonic(&cusps) {
            return Err(VedicError::InvariantViolation(format!(
                "house cusps are not monotonic: {cusps:?}"
            )));
        }

        let mut placements = Vec::with_capacity(9);
        for graha in ALL_GRAHAS {
            let position = self.ephemeris.position(instant, graha.body())?;
            let sid = normalize_360(position.longitude_deg - aya);
            placements.push(GrahaPlacement {
                graha,
                position,
                sidereal_longitude_deg: sid,
                rashi: rashi_from_longitude(sid),
                nakshatra: nakshatra_from_longitude(sid),
                house: bhava_for_longitude(&cusps, sid),
                retrograde: position.is_retrograde(),
            });
        }
        let grahas: [GrahaPlacement; 9] = placements
            .try_into()
            .map_err(|_| VedicError::InvariantViolation("expected nine placements".into()))?;

        debug!(
            jd = instant.jd_ut(),
            ayanamsha = %self.config.ayanamsha,
            houses = %self.config.house_system,
            lagna = houses.lagna_deg,
            "chart built"
        );

        Ok(Chart {
            instant,
            location: *location,
            time_precision,
            ayanamsha: self.config.ayanamsha,
            ayanamsha_deg: aya,
            lagna: rashi_from_longitude(houses.lagna_deg),
            houses,
            grahas,
        })
    }
}
