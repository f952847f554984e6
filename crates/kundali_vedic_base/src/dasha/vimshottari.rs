//! Vimshottari dasha: the 120-year nakshatra-based period system.
//!
//! The Moon's nakshatra at birth picks the first lord (nakshatra index mod
//! 9 in the cyclic order below). The part of the Moon's nakshatra already
//! traversed is the part of that lord's period already spent, so the tree
//! is anchored on a virtual start before birth and the first period is
//! cut short.

use kundali_time::Instant;
use tracing::debug;

use super::types::{
    DAYS_PER_YEAR, DEFAULT_DASHA_DEPTH, DashaLevel, DashaNode, DashaTree, MAX_DASHA_DEPTH,
};
use crate::error::VedicError;
use crate::graha::Graha;
use crate::nakshatra::nakshatra_from_longitude;

/// Cyclic lord order with period lengths in years.
pub const VIMSHOTTARI_SEQUENCE: [(Graha, f64); 9] = [
    (Graha::Ketu, 7.0),
    (Graha::Shukra, 20.0),
    (Graha::Surya, 6.0),
    (Graha::Chandra, 10.0),
    (Graha::Mangal, 7.0),
    (Graha::Rahu, 18.0),
    (Graha::Guru, 16.0),
    (Graha::Shani, 19.0),
    (Graha::Buddh, 17.0),
];

/// Length of the full cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Period of a lord in years. Every graha has one.
pub fn vimshottari_years(graha: Graha) -> f64 {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .find(|(g, _)| *g == graha)
        .map_or(0.0, |(_, y)| *y)
}

/// Lord of a nakshatra (0-based index).
pub const fn nakshatra_lord(nakshatra_index: u8) -> Graha {
    VIMSHOTTARI_SEQUENCE[(nakshatra_index % 9) as usize].0
}

fn position_of(graha: Graha) -> usize {
    VIMSHOTTARI_SEQUENCE
        .iter()
        .position(|(g, _)| *g == graha)
        .unwrap_or(0)
}

/// Builds Vimshottari trees to a fixed depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashaTreeBuilder {
    depth: u8,
}

impl Default for DashaTreeBuilder {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DASHA_DEPTH,
        }
    }
}

impl DashaTreeBuilder {
    /// `depth` is the number of levels, 1 (Mahadasha only) to 5.
    pub fn new(depth: u8) -> Result<Self, VedicError> {
        if !(1..=MAX_DASHA_DEPTH).contains(&depth) {
            return Err(VedicError::InvalidInput("dasha depth must be between 1 and 5"));
        }
        Ok(Self { depth })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Build the tree from the Moon's sidereal longitude at birth.
    pub fn build(&self, moon_sidereal_lon: f64, birth: Instant) -> Result<DashaTree, VedicError> {
        if !moon_sidereal_lon.is_finite() {
            return Err(VedicError::InvalidInput("moon longitude must be finite"));
        }
        let nak = nakshatra_from_longitude(moon_sidereal_lon);
        let elapsed = nak.elapsed_fraction();
        let first_lord = nakshatra_lord(nak.nakshatra_index);
        let first_years = vimshottari_years(first_lord);
        let anchor = birth.add_days(-elapsed * first_years * DAYS_PER_YEAR);

        let start_pos = position_of(first_lord);
        let mut cumulative_years = 0.0;
        let mut mahadashas = Vec::with_capacity(9);
        for i in 0..9 {
            let (lord, years) = VIMSHOTTARI_SEQUENCE[(start_pos + i) % 9];
            let start = if i == 0 {
                birth
            } else {
                anchor.add_days(cumulative_years * DAYS_PER_YEAR)
            };
            cumulative_years += years;
            let end = anchor.add_days(cumulative_years * DAYS_PER_YEAR);
            let mut node = DashaNode {
                lord,
                start,
                end,
                level: DashaLevel::Mahadasha,
                children: Vec::new(),
            };
            self.fill_children(&mut node);
            mahadashas.push(node);
        }

        debug!(
            nakshatra = nak.nakshatra.name(),
            first_lord = %first_lord,
            elapsed,
            depth = self.depth,
            "vimshottari tree built"
        );

        Ok(DashaTree {
            birth,
            adjusted_anchor: anchor,
            moon_nakshatra: nak.nakshatra,
            elapsed_fraction: elapsed,
            depth: self.depth,
            mahadashas,
        })
    }

    /// Recursively split `node` down to the requested depth.
    fn fill_children(&self, node: &mut DashaNode) {
        let child_depth = node.depth() + 1;
        if child_depth >= self.depth {
            return;
        }
        let Some(level) = DashaLevel::from_depth(child_depth) else {
            return;
        };
        node.children = sub_periods(node, level);
        for child in &mut node.children {
            self.fill_children(child);
        }
    }
}

/// Children of `parent`, starting from the parent's own lord, each lasting
/// `D × years / 120`. The last child is snapped onto the parent's end.
fn sub_periods(parent: &DashaNode, level: DashaLevel) -> Vec<DashaNode> {
    let span = parent.duration_days();
    let start_pos = position_of(parent.lord);
    let mut cursor = parent.start;
    let mut children: Vec<DashaNode> = (0..9)
        .map(|i| {
            let (lord, years) = VIMSHOTTARI_SEQUENCE[(start_pos + i) % 9];
            let end = cursor.add_days(span * years / VIMSHOTTARI_TOTAL_YEARS);
            let child = DashaNode {
                lord,
                start: cursor,
                end,
                level,
                children: Vec::new(),
            };
            cursor = end;
            child
        })
        .collect();
    if let Some(last) = children.last_mut() {
        last.end = parent.end;
    }
    children
}
