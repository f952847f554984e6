//! Core types for the dasha (planetary period) tree.

use kundali_time::Instant;
use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::graha::Graha;
use crate::nakshatra::Nakshatra;

/// Year length used for all period arithmetic.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Deepest supported level count (Mahadasha through Pranadasha).
pub const MAX_DASHA_DEPTH: u8 = 5;

/// Default number of levels: Mahadasha and Antardasha.
pub const DEFAULT_DASHA_DEPTH: u8 = 2;

/// Tolerance used when checking that children partition their parent.
pub const PARTITION_EPSILON_DAYS: f64 = 1.0 / 86_400.0;

/// The five hierarchical levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DashaLevel {
    Mahadasha = 0,
    Antardasha = 1,
    Pratyantardasha = 2,
    Sookshmadasha = 3,
    Pranadasha = 4,
}

impl DashaLevel {
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            0 => Some(Self::Mahadasha),
            1 => Some(Self::Antardasha),
            2 => Some(Self::Pratyantardasha),
            3 => Some(Self::Sookshmadasha),
            4 => Some(Self::Pranadasha),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
            Self::Sookshmadasha => "Sookshmadasha",
            Self::Pranadasha => "Pranadasha",
        }
    }
}

/// One period in the tree.
///
/// `start` is inclusive and `end` exclusive. Children, when present,
/// partition `[start, end)` in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaNode {
    pub lord: Graha,
    pub start: Instant,
    pub end: Instant,
    pub level: DashaLevel,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<DashaNode>,
}

impl DashaNode {
    pub fn duration_days(&self) -> f64 {
        self.end.days_since(self.start)
    }

    pub fn contains(&self, instant: Instant) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Depth of the level, 0 for a Mahadasha.
    pub fn depth(&self) -> u8 {
        self.level as u8
    }
}

/// A complete Vimshottari tree for one birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaTree {
    pub birth: Instant,
    /// Birth minus the elapsed part of the first lord's period.
    pub adjusted_anchor: Instant,
    pub moon_nakshatra: Nakshatra,
    /// Fraction of the Moon's nakshatra already traversed at birth.
    pub elapsed_fraction: f64,
    /// Number of levels generated.
    pub depth: u8,
    pub mahadashas: Vec<DashaNode>,
}

impl DashaTree {
    /// First instant not covered by the tree.
    pub fn end(&self) -> Option<Instant> {
        self.mahadashas.last().map(|n| n.end)
    }

    /// Active node at every level for `instant`, outermost first.
    ///
    /// Empty when `instant` lies outside the tree.
    pub fn active_path(&self, instant: Instant) -> Vec<&DashaNode> {
        let mut path = Vec::with_capacity(self.depth as usize);
        let mut level: &[DashaNode] = &self.mahadashas;
        while let Some(node) = level.iter().find(|n| n.contains(instant)) {
            path.push(node);
            level = &node.children;
        }
        path
    }

    /// Check that the top level starts at birth and is contiguous, and that
    /// every node's children start at the node's start, are contiguous and
    /// end at the node's end (within `epsilon_days`).
    pub fn verify_partition(&self, epsilon_days: f64) -> Result<(), VedicError> {
        let Some(first) = self.mahadashas.first() else {
            return Err(VedicError::InvariantViolation("empty dasha tree".into()));
        };
        if first.start.days_since(self.birth).abs() > epsilon_days {
            return Err(VedicError::InvariantViolation(format!(
                "first mahadasha starts at {} instead of birth {}",
                first.start, self.birth
            )));
        }
        check_contiguous(&self.mahadashas, epsilon_days)?;
        for node in &self.mahadashas {
            verify_node(node, epsilon_days)?;
        }
        Ok(())
    }
}

fn check_contiguous(nodes: &[DashaNode], eps: f64) -> Result<(), VedicError> {
    for pair in nodes.windows(2) {
        let gap = pair[1].start.days_since(pair[0].end);
        if gap.abs() > eps {
            return Err(VedicError::InvariantViolation(format!(
                "{} {} ends {} days away from the next start",
                pair[0].level.name(),
                pair[0].lord,
                gap
            )));
        }
    }
    for node in nodes {
        if node.duration_days() <= 0.0 {
            return Err(VedicError::InvariantViolation(format!(
                "{} {} has non-positive duration",
                node.level.name(),
                node.lord
            )));
        }
    }
    Ok(())
}

fn verify_node(node: &DashaNode, eps: f64) -> Result<(), VedicError> {
    let (Some(first), Some(last)) = (node.children.first(), node.children.last()) else {
        return Ok(());
    };
    let head = first.start.days_since(node.start).abs();
    let tail = last.end.days_since(node.end).abs();
    if head > eps || tail > eps {
        return Err(VedicError::InvariantViolation(format!(
            "children of {} {} do not cover the parent span",
            node.level.name(),
            node.lord
        )));
    }
    check_contiguous(&node.children, eps)?;
    node.children.iter().try_for_each(|c| verify_node(c, eps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(lord: Graha, start: f64, end: f64) -> DashaNode {
        DashaNode {
            lord,
            start: Instant::from_jd_ut(start),
            end: Instant::from_jd_ut(end),
            level: DashaLevel::Mahadasha,
            children: Vec::new(),
        }
    }

    #[test]
    fn level_from_depth() {
        assert_eq!(DashaLevel::from_depth(0), Some(DashaLevel::Mahadasha));
        assert_eq!(DashaLevel::from_depth(4), Some(DashaLevel::Pranadasha));
        assert_eq!(DashaLevel::from_depth(5), None);
    }

    #[test]
    fn gap_is_reported() {
        let tree = DashaTree {
            birth: Instant::from_jd_ut(0.0),
            adjusted_anchor: Instant::from_jd_ut(0.0),
            moon_nakshatra: Nakshatra::Ashwini,
            elapsed_fraction: 0.0,
            depth: 1,
            mahadashas: vec![node(Graha::Ketu, 0.0, 10.0), node(Graha::Shukra, 11.0, 20.0)],
        };
        let err = tree.verify_partition(PARTITION_EPSILON_DAYS).unwrap_err();
        assert!(matches!(err, VedicError::InvariantViolation(_)));
    }

    #[test]
    fn path_is_empty_outside() {
        let tree = DashaTree {
            birth: Instant::from_jd_ut(0.0),
            adjusted_anchor: Instant::from_jd_ut(0.0),
            moon_nakshatra: Nakshatra::Ashwini,
            elapsed_fraction: 0.0,
            depth: 1,
            mahadashas: vec![node(Graha::Ketu, 0.0, 10.0)],
        };
        assert!(tree.active_path(Instant::from_jd_ut(10.0)).is_empty());
        assert_eq!(tree.active_path(Instant::from_jd_ut(0.0)).len(), 1);
    }
}
