//! Two-chart comparison: cross aspects and the midpoint composite.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aspect::AspectTable;
use crate::chart::Chart;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::rashi::{RashiInfo, rashi_from_longitude};
use crate::util::normalize_360;

/// Below this resultant length the two directions cancel out.
const ANTIPODAL_EPS: f64 = 1e-12;

/// Circular mean of two longitudes in degrees.
///
/// Exactly opposite longitudes have no mean; they resolve to `a + 90°`.
pub fn circular_mean(a: f64, b: f64) -> f64 {
    let (sa, ca) = a.to_radians().sin_cos();
    let (sb, cb) = b.to_radians().sin_cos();
    let (y, x) = (sa + sb, ca + cb);
    if x.hypot(y) < ANTIPODAL_EPS {
        return normalize_360(a + 90.0);
    }
    normalize_360(y.atan2(x).to_degrees())
}

/// One aspect between a graha of the first chart and one of the second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossAspect {
    pub first: Graha,
    pub second: Graha,
    pub aspect: String,
    pub angle_deg: f64,
    pub orb_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositePoint {
    pub graha: Graha,
    pub longitude_deg: f64,
    pub rashi: RashiInfo,
}

/// Midpoint chart of two natal charts, sidereal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeChart {
    pub grahas: [CompositePoint; 9],
    pub lagna_deg: f64,
    pub lagna: RashiInfo,
    pub mc_deg: f64,
}

impl CompositeChart {
    pub fn longitude(&self, graha: Graha) -> f64 {
        self.grahas[graha.index() as usize].longitude_deg
    }
}

/// Full comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynastryReport {
    pub composite: CompositeChart,
    pub cross_aspects: Vec<CrossAspect>,
}

/// Compares two charts against one aspect table.
#[derive(Debug, Clone, Default)]
pub struct SynastryComposer {
    aspects: AspectTable,
}

impl SynastryComposer {
    pub fn new(aspects: AspectTable) -> Self {
        Self { aspects }
    }

    pub fn aspects(&self) -> &AspectTable {
        &self.aspects
    }

    /// Every in-orb aspect between a graha of `first` and a graha of
    /// `second`, in first-chart then second-chart graha order.
    pub fn cross_aspects(&self, first: &Chart, second: &Chart) -> Vec<CrossAspect> {
        let mut out = Vec::new();
        for a in ALL_GRAHAS {
            let lon_a = first.longitude(a);
            for b in ALL_GRAHAS {
                let lon_b = second.longitude(b);
                let Some(m) = self.aspects.find(lon_a, lon_b) else {
                    continue;
                };
                let Some(aspect) = self.aspects.get(m.index) else {
                    continue;
                };
                out.push(CrossAspect {
                    first: a,
                    second: b,
                    aspect: aspect.name.clone(),
                    angle_deg: aspect.angle_deg,
                    orb_deg: m.orb_deg,
                });
            }
        }
        out
    }

    /// Composite of two charts. Argument order matters only for exactly
    /// opposite pairs.
    pub fn composite(&self, first: &Chart, second: &Chart) -> CompositeChart {
        let grahas = ALL_GRAHAS.map(|graha| {
            let lon = circular_mean(first.longitude(graha), second.longitude(graha));
            CompositePoint {
                graha,
                longitude_deg: lon,
                rashi: rashi_from_longitude(lon),
            }
        });
        let lagna_deg = circular_mean(first.lagna_deg(), second.lagna_deg());
        CompositeChart {
            grahas,
            lagna_deg,
            lagna: rashi_from_longitude(lagna_deg),
            mc_deg: circular_mean(first.houses.mc_deg, second.houses.mc_deg),
        }
    }

    pub fn compare(&self, first: &Chart, second: &Chart) -> SynastryReport {
        let report = SynastryReport {
            composite: self.composite(first, second),
            cross_aspects: self.cross_aspects(first, second),
        };
        debug!(
            cross_aspects = report.cross_aspects.len(),
            composite_lagna = report.composite.lagna_deg,
            "synastry compared"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::separation;

    #[test]
    fn simple_means() {
        assert!((circular_mean(10.0, 30.0) - 20.0).abs() < 1e-9);
        assert!(separation(circular_mean(350.0, 10.0), 0.0) < 1e-9);
        assert!(separation(circular_mean(300.0, 60.0), 0.0) < 1e-9);
    }

    #[test]
    fn antipodal_tie_break() {
        for _ in 0..5 {
            assert_eq!(circular_mean(10.0, 190.0), 100.0);
        }
        assert_eq!(circular_mean(190.0, 10.0), 280.0);
        assert_eq!(circular_mean(270.0, 90.0), 0.0);
    }

    #[test]
    fn mean_is_symmetric_off_antipode() {
        assert!((circular_mean(40.0, 200.0) - circular_mean(200.0, 40.0)).abs() < 1e-9);
    }
}
