//! Types for transit scanning.

use kundali_time::Instant;
use kundali_vedic_base::Graha;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for [`TransitScanner`](crate::TransitScanner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitConfig {
    /// Longest sampling step, days. Fast grahas are sampled more finely, see
    /// [`TransitScanner::step_for`](crate::TransitScanner::step_for).
    pub step_days: f64,
    /// Most samples taken per transiting body. A range that would need more
    /// is sampled with a proportionally longer step.
    pub max_samples: u32,
    /// Evaluations allowed when refining one peak, entry or exit.
    pub max_iterations: u32,
    /// Refinement stops once the bracket is narrower than this, days.
    pub convergence_days: f64,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            step_days: 1.0,
            max_samples: 20_000,
            max_iterations: 50,
            convergence_days: 1.0e-5,
        }
    }
}

impl TransitConfig {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(self.step_days > 0.0 && self.step_days <= 30.0) {
            return Err(SearchError::InvalidConfig("step_days must be within (0, 30]"));
        }
        if self.max_samples < 3 {
            return Err(SearchError::InvalidConfig("max_samples must be at least 3"));
        }
        if self.max_iterations == 0 {
            return Err(SearchError::InvalidConfig("max_iterations must be positive"));
        }
        if !(self.convergence_days > 0.0) {
            return Err(SearchError::InvalidConfig("convergence_days must be positive"));
        }
        Ok(())
    }
}

/// One pass of a transiting graha through the orb of an aspect to a natal
/// graha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitEvent {
    pub transiting: Graha,
    pub natal: Graha,
    pub aspect: String,
    pub aspect_angle_deg: f64,
    /// Deviation from the exact angle at the first in-orb sample.
    pub orb_at_detection_deg: f64,
    /// Refined instant of closest approach.
    pub peak: Instant,
    pub orb_at_peak_deg: f64,
    /// Whether the aspect became exact during the pass.
    pub perfected: bool,
    /// Orb entry; `None` when already in orb at the start of the range.
    pub entry: Option<Instant>,
    /// Orb exit; `None` when still in orb at the end of the range.
    pub exit: Option<Instant>,
}
