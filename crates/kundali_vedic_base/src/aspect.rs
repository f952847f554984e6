//! Angular aspects between two longitudes, shared by transit scanning and
//! synastry.
//!
//! The separation of two longitudes is folded to [0, 180] before matching,
//! so an aspect angle describes both directions at once.

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::util::separation;

/// One aspect angle with its orb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub name: String,
    pub angle_deg: f64,
    pub orb_deg: f64,
}

impl Aspect {
    pub fn new(name: impl Into<String>, angle_deg: f64, orb_deg: f64) -> Self {
        Self {
            name: name.into(),
            angle_deg,
            orb_deg,
        }
    }

    /// Distance of a folded separation from this aspect's exact angle.
    pub fn deviation(&self, folded_separation: f64) -> f64 {
        (folded_separation - self.angle_deg).abs()
    }
}

/// A matched aspect: which one, and how far from exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectMatch {
    /// Index into the table that produced the match.
    pub index: usize,
    pub orb_deg: f64,
}

/// The ordered set of aspects in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AspectTable {
    aspects: Vec<Aspect>,
}

impl Default for AspectTable {
    /// Conjunction, opposition, trine, square and sextile.
    fn default() -> Self {
        Self {
            aspects: vec![
                Aspect::new("conjunction", 0.0, 8.0),
                Aspect::new("opposition", 180.0, 8.0),
                Aspect::new("trine", 120.0, 7.0),
                Aspect::new("square", 90.0, 7.0),
                Aspect::new("sextile", 60.0, 5.0),
            ],
        }
    }
}

impl AspectTable {
    pub fn new(aspects: Vec<Aspect>) -> Result<Self, VedicError> {
        let table = Self { aspects };
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), VedicError> {
        if self.aspects.is_empty() {
            return Err(VedicError::InvalidInput("aspect table is empty"));
        }
        for a in &self.aspects {
            if !(0.0..=180.0).contains(&a.angle_deg) {
                return Err(VedicError::InvalidInput("aspect angle must be within [0, 180]"));
            }
            if !(a.orb_deg > 0.0 && a.orb_deg < 30.0) {
                return Err(VedicError::InvalidInput("aspect orb must be within (0, 30)"));
            }
        }
        Ok(())
    }

    pub fn aspects(&self) -> &[Aspect] {
        &self.aspects
    }

    pub fn get(&self, index: usize) -> Option<&Aspect> {
        self.aspects.get(index)
    }

    /// Closest in-orb aspect between two longitudes. Ties go to the aspect
    /// listed first.
    pub fn find(&self, lon_a: f64, lon_b: f64) -> Option<AspectMatch> {
        let sep = separation(lon_a, lon_b);
        let mut best: Option<AspectMatch> = None;
        for (index, aspect) in self.aspects.iter().enumerate() {
            let orb = aspect.deviation(sep);
            if orb <= aspect.orb_deg && best.is_none_or(|b| orb < b.orb_deg) {
                best = Some(AspectMatch {
                    index,
                    orb_deg: orb,
                });
            }
        }
        best
    }

    /// Deviation of two longitudes from one specific aspect.
    pub fn orb_for(&self, index: usize, lon_a: f64, lon_b: f64) -> Option<f64> {
        self.aspects
            .get(index)
            .map(|a| a.deviation(separation(lon_a, lon_b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid() {
        AspectTable::default().validate().unwrap();
        assert_eq!(AspectTable::default().aspects().len(), 5);
    }

    #[test]
    fn folded_matching() {
        let t = AspectTable::default();
        let m = t.find(10.0, 128.0).unwrap();
        assert_eq!(t.get(m.index).unwrap().name, "trine");
        assert!((m.orb_deg - 2.0).abs() < 1e-12);
        // 10 -> 250 is 240 forward, folded to 120.
        let m = t.find(10.0, 250.0).unwrap();
        assert_eq!(t.get(m.index).unwrap().name, "trine");
        assert!(m.orb_deg.abs() < 1e-12);
    }

    #[test]
    fn across_zero() {
        let t = AspectTable::default();
        let m = t.find(355.0, 3.0).unwrap();
        assert_eq!(t.get(m.index).unwrap().name, "conjunction");
        assert!((m.orb_deg - 8.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_orb() {
        assert!(AspectTable::default().find(0.0, 40.0).is_none());
    }

    #[test]
    fn rejects_bad_orb() {
        assert!(AspectTable::new(vec![Aspect::new("x", 45.0, 0.0)]).is_err());
        assert!(AspectTable::new(vec![Aspect::new("x", 200.0, 2.0)]).is_err());
        assert!(AspectTable::new(Vec::new()).is_err());
    }
}
