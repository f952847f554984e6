//! Dasha (planetary period) calculations.
//!
//! Only the Vimshottari system is provided. A tree has one node per period;
//! each level splits its parent in the same cyclic order, starting from the
//! parent's lord, down to a caller-chosen depth.

pub mod types;
pub mod vimshottari;

pub use types::{
    DAYS_PER_YEAR, DEFAULT_DASHA_DEPTH, DashaLevel, DashaNode, DashaTree, MAX_DASHA_DEPTH,
    PARTITION_EPSILON_DAYS,
};
pub use vimshottari::{
    DashaTreeBuilder, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS, nakshatra_lord,
    vimshottari_years,
};
