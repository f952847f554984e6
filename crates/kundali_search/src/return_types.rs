//! Types for return searches.

use kundali_core::Body;
use kundali_time::Instant;
use kundali_vedic_base::AyanamshaSystem;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::search_util::Sample;

/// Default convergence tolerance on the longitude delta, degrees.
pub const DEFAULT_TOLERANCE_DEG: f64 = 1.0e-4;

/// Default refinement budget.
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Default search horizon as a multiple of the body's mean period.
pub const DEFAULT_HORIZON_FACTOR: f64 = 1.5;

/// Coarse steps per mean period.
pub const STEPS_PER_PERIOD: f64 = 720.0;

/// Configuration for [`ReturnFinder`](crate::ReturnFinder).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReturnConfig {
    /// Largest accepted |delta| at the reported instant, degrees.
    pub tolerance_deg: f64,
    /// Bisection/interpolation evaluations allowed after bracketing.
    pub max_iterations: u32,
    /// Search horizon in mean periods of the body.
    pub horizon_factor: f64,
}

impl Default for ReturnConfig {
    fn default() -> Self {
        Self {
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            horizon_factor: DEFAULT_HORIZON_FACTOR,
        }
    }
}

impl ReturnConfig {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(self.tolerance_deg > 0.0 && self.tolerance_deg < 1.0) {
            return Err(SearchError::InvalidConfig("tolerance_deg must be within (0, 1)"));
        }
        if self.max_iterations == 0 || self.max_iterations > 200 {
            return Err(SearchError::InvalidConfig("max_iterations must be within 1..=200"));
        }
        if !(self.horizon_factor > 0.0 && self.horizon_factor <= 10.0) {
            return Err(SearchError::InvalidConfig("horizon_factor must be within (0, 10]"));
        }
        Ok(())
    }
}

/// Why a search stopped without a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotFoundReason {
    /// No crossing within the search horizon.
    HorizonExhausted,
    /// A crossing was bracketed but not refined within the budget.
    IterationBudgetExhausted,
}

/// Search progress. Each call to [`ReturnFinder::step`](crate::ReturnFinder::step)
/// moves one state forward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ReturnState {
    /// Walking forward. `last` is `None` until the start has been evaluated.
    Searching { at: Instant, last: Option<f64>, steps: u32 },
    /// A crossing lies between `lo` and `hi`.
    Bracketed { lo: Sample, hi: Sample },
    /// Narrowing the bracket.
    Refining { lo: Sample, hi: Sample, iterations: u32 },
    Found { instant: Instant, delta_deg: f64, iterations: u32 },
    NotFound { reason: NotFoundReason, iterations: u32 },
}

impl ReturnState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found { .. } | Self::NotFound { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Searching { .. } => "searching",
            Self::Bracketed { .. } => "bracketed",
            Self::Refining { .. } => "refining",
            Self::Found { .. } => "found",
            Self::NotFound { .. } => "not_found",
        }
    }
}

/// Final result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ReturnOutcome {
    Found { instant: Instant, delta_deg: f64, iterations: u32 },
    NotFound { reason: NotFoundReason, iterations: u32 },
}

impl ReturnOutcome {
    pub fn instant(&self) -> Option<Instant> {
        match self {
            Self::Found { instant, .. } => Some(*instant),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// A body returning to a longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnEvent {
    pub body: Body,
    /// Sidereal target longitude, degrees.
    pub target_longitude_deg: f64,
    pub ayanamsha: AyanamshaSystem,
    pub search_start: Instant,
    pub outcome: ReturnOutcome,
}
