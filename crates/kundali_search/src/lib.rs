//! Time-domain searches over the sidereal ephemeris.
//!
//! This crate provides:
//! - Return search: the next instant a body reaches a sidereal longitude,
//!   driven as an explicit bounded state machine ([`ReturnFinder`])
//! - Solar, lunar and planetary returns against a natal chart
//! - Transit scanning: aspect passes of moving grahas to natal positions,
//!   with refined peak, entry and exit instants ([`TransitScanner`])

pub mod error;
pub mod return_types;
pub mod returns;
pub(crate) mod search_util;
pub mod transit;
pub mod transit_types;

pub use error::SearchError;
pub use return_types::{
    NotFoundReason, ReturnConfig, ReturnEvent, ReturnOutcome, ReturnState,
};
pub use returns::{ReturnFinder, lunar_return, planetary_return, solar_return};
pub use search_util::Sample;
pub use transit::TransitScanner;
pub use transit_types::{TransitConfig, TransitEvent};
