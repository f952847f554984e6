//! Sidereal (Vedic) calculations built on the ephemeris contract.
//!
//! This crate provides:
//! - Ayanamsha for five sidereal reference systems, rashi/nakshatra/pada lookup
//! - Lagna, MC and house division (Sripati, Equal, Whole Sign, Placidus)
//! - [`ChartBuilder`] assembling a full sidereal [`Chart`]
//! - Vimshottari dasha trees ([`DashaTreeBuilder`])
//! - Shadbala strength scores ([`ShadbalaScorer`])
//! - Aspects, two-chart synastry and the composite chart
//! - Sunrise/sunset and the daily muhurta windows
//!
//! Everything here is a pure function of its inputs plus `&dyn Ephemeris`.

pub mod aspect;
pub mod ayanamsha;
pub mod bhava;
pub mod bhava_types;
pub mod chart;
pub mod dasha;
pub mod drishti;
pub mod error;
pub mod graha;
pub mod graha_relationships;
pub mod lagna;
pub mod muhurta;
pub mod nakshatra;
pub mod rashi;
pub mod riseset;
pub mod shadbala;
pub mod synastry;
pub mod util;

pub use aspect::{Aspect, AspectMatch, AspectTable};
pub use ayanamsha::{AyanamshaSystem, ayanamsha_deg, sidereal_to_tropical, tropical_to_sidereal};
pub use bhava::{MAX_LATITUDE_DEG, bhava_for_longitude, compute_bhavas, cusps_are_monotonic};
pub use bhava_types::{ALL_BHAVA_SYSTEMS, Bhava, BhavaResult, BhavaSystem};
pub use chart::{Chart, ChartBuilder, ChartConfig, GrahaPlacement, sidereal_longitude};
pub use dasha::{DashaLevel, DashaNode, DashaTree, DashaTreeBuilder};
pub use drishti::graha_drishti;
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, SAPTA_GRAHAS};
pub use lagna::lagna_and_mc_deg;
pub use muhurta::{MuhurtaWindows, TimeWindow, WindowKind, muhurta_for_date, muhurta_windows};
pub use nakshatra::{ALL_NAKSHATRAS, Nakshatra, NakshatraInfo, nakshatra_from_longitude};
pub use rashi::{
    ALL_RASHIS, Dms, Rashi, RashiInfo, deg_to_dms, dms_to_deg, rashi_from_longitude,
    rashi_range,
};
pub use riseset::{SolarDay, solar_day};
pub use shadbala::{ShadbalaScorer, StrengthClass, StrengthComponents, StrengthScore};
pub use synastry::{
    CompositeChart, CompositePoint, CrossAspect, SynastryComposer, SynastryReport, circular_mean,
};
