//! Facade over the kundali engine.
//!
//! Loads a [`KundaliConfig`], accepts [`CalculationRequest`]s (as values or
//! JSON) and dispatches them to the chart, dasha, strength, search and
//! muhurta layers. Every error surfaces as a [`KundaliError`] whose
//! [`category`](KundaliError::category) tells callers what went wrong.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use kundali_rs::*;
//!
//! let eph = AnalyticEphemeris::default();
//! let config = KundaliConfig::default();
//! let json = calculate_json(&eph, &config, r#"{
//!     "birthDate": "15/06/1990",
//!     "birthTime": "14:30",
//!     "geoLocation": { "latitudeDeg": 19.076, "longitudeDeg": 72.877, "utcOffsetHours": 5.5 },
//!     "calculationKind": "chart",
//!     "parameters": {}
//! }"#)?;
//! ```

pub mod calculate;
pub mod config;
pub mod error;
pub mod request;

pub use calculate::{build_chart, calculate, calculate_json, resolve_birth};
pub use config::{AspectEntry, KundaliConfig, ReturnsSection, TransitsSection};
pub use error::{ErrorCategory, KundaliError};
pub use request::{
    BirthData, Calculation, CalculationRequest, CalculationResult, ChartParameters,
    DashaParameters, MuhurtaParameters, ReturnParameters, SynastryParameters, TransitParameters,
};

// Re-export the types callers need to build requests and read results.
pub use kundali_core::{AnalyticEphemeris, Body, Ephemeris};
pub use kundali_search::{ReturnEvent, ReturnOutcome, TransitEvent};
pub use kundali_time::{GeoLocation, Instant, TimePrecision};
pub use kundali_vedic_base::{
    ALL_GRAHAS, AyanamshaSystem, BhavaSystem, Chart, DashaNode, DashaTree, Graha,
    MuhurtaWindows, StrengthScore, SynastryReport, deg_to_dms,
};
