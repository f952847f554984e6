//! Return search: when does a body next reach a given sidereal longitude?
//!
//! The search is an explicit state machine so its bounds are part of the
//! contract rather than a loop condition:
//!
//! ```text
//! Searching ──crossing──▶ Bracketed ──▶ Refining ──|delta| ≤ tol──▶ Found
//!     │                                    │
//!     └─horizon spent─▶ NotFound           └─budget spent─▶ NotFound
//! ```
//!
//! Searching walks forward in steps of a 720th of the body's mean period
//! and watches the signed delta `normalize_±180(lon(t) − target)` for a
//! genuine sign change. Refining bisects the bracket, switching to the
//! chord root once the bracket's delta span is small.

use kundali_core::{Body, Ephemeris};
use kundali_time::Instant;
use kundali_vedic_base::{AyanamshaSystem, Chart, Graha, sidereal_longitude};
use tracing::{debug, trace};

use crate::error::SearchError;
use crate::return_types::{
    NotFoundReason, ReturnConfig, ReturnEvent, ReturnOutcome, ReturnState, STEPS_PER_PERIOD,
};
use crate::search_util::{Sample, is_genuine_crossing, linear_root, midpoint, signed_delta};

/// Bracket delta span (in tolerances) below which the chord root replaces
/// the midpoint.
const CHORD_SWITCH_TOLERANCES: f64 = 100.0;

/// Finds the next instant a body reaches a target sidereal longitude.
pub struct ReturnFinder<'a> {
    ephemeris: &'a dyn Ephemeris,
    body: Body,
    target_deg: f64,
    ayanamsha: AyanamshaSystem,
    start: Instant,
    config: ReturnConfig,
    step_days: f64,
    max_steps: u32,
}

impl<'a> ReturnFinder<'a> {
    pub fn new(
        ephemeris: &'a dyn Ephemeris,
        body: Body,
        target_deg: f64,
        start: Instant,
        ayanamsha: AyanamshaSystem,
        config: ReturnConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        if !target_deg.is_finite() {
            return Err(SearchError::InvalidInput("target longitude must be finite"));
        }
        let period = body.mean_geocentric_period_days();
        let step_days = period / STEPS_PER_PERIOD;
        let max_steps = (config.horizon_factor * STEPS_PER_PERIOD).ceil() as u32;
        Ok(Self {
            ephemeris,
            body,
            target_deg: target_deg.rem_euclid(360.0),
            ayanamsha,
            start,
            config,
            step_days,
            max_steps,
        })
    }

    pub fn body(&self) -> Body {
        self.body
    }

    pub fn step_days(&self) -> f64 {
        self.step_days
    }

    /// Number of coarse steps the horizon allows.
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn initial_state(&self) -> ReturnState {
        ReturnState::Searching {
            at: self.start,
            last: None,
            steps: 0,
        }
    }

    fn delta_at(&self, instant: Instant) -> Result<f64, SearchError> {
        let lon = sidereal_longitude(self.ephemeris, instant, self.body, self.ayanamsha)?;
        Ok(signed_delta(lon, self.target_deg))
    }

    fn within_tolerance(&self, delta: f64) -> bool {
        delta.abs() <= self.config.tolerance_deg
    }

    /// Advance one transition. Terminal states are returned unchanged.
    pub fn step(&self, state: ReturnState) -> Result<ReturnState, SearchError> {
        let next = match state {
            ReturnState::Searching { at, last: None, steps } => {
                let delta = self.delta_at(at)?;
                if self.within_tolerance(delta) {
                    ReturnState::Found {
                        instant: at,
                        delta_deg: delta,
                        iterations: 0,
                    }
                } else {
                    ReturnState::Searching {
                        at,
                        last: Some(delta),
                        steps,
                    }
                }
            }
            ReturnState::Searching {
                at,
                last: Some(prev),
                steps,
            } => {
                if steps >= self.max_steps {
                    return Ok(ReturnState::NotFound {
                        reason: NotFoundReason::HorizonExhausted,
                        iterations: 0,
                    });
                }
                let t = at.add_days(self.step_days);
                let delta = self.delta_at(t)?;
                if self.within_tolerance(delta) {
                    ReturnState::Found {
                        instant: t,
                        delta_deg: delta,
                        iterations: 0,
                    }
                } else if is_genuine_crossing(prev, delta) {
                    ReturnState::Bracketed {
                        lo: Sample::new(at, prev),
                        hi: Sample::new(t, delta),
                    }
                } else {
                    ReturnState::Searching {
                        at: t,
                        last: Some(delta),
                        steps: steps + 1,
                    }
                }
            }
            ReturnState::Bracketed { lo, hi } => ReturnState::Refining {
                lo,
                hi,
                iterations: 0,
            },
            ReturnState::Refining { lo, hi, iterations } => {
                if iterations >= self.config.max_iterations {
                    return Ok(ReturnState::NotFound {
                        reason: NotFoundReason::IterationBudgetExhausted,
                        iterations,
                    });
                }
                let span = (hi.value - lo.value).abs();
                let t = if span < CHORD_SWITCH_TOLERANCES * self.config.tolerance_deg {
                    linear_root(lo, hi)
                } else {
                    midpoint(lo.instant, hi.instant)
                };
                let delta = self.delta_at(t)?;
                let iterations = iterations + 1;
                trace!(iterations, jd = t.jd_ut(), delta, "return refinement");
                if self.within_tolerance(delta) {
                    ReturnState::Found {
                        instant: t,
                        delta_deg: delta,
                        iterations,
                    }
                } else if lo.value * delta < 0.0 {
                    ReturnState::Refining {
                        lo,
                        hi: Sample::new(t, delta),
                        iterations,
                    }
                } else {
                    ReturnState::Refining {
                        lo: Sample::new(t, delta),
                        hi,
                        iterations,
                    }
                }
            }
            terminal @ (ReturnState::Found { .. } | ReturnState::NotFound { .. }) => terminal,
        };
        if next.name() != state.name() {
            debug!(body = %self.body, from = state.name(), to = next.name(), "return search transition");
        }
        Ok(next)
    }

    /// Drive the machine to a terminal state.
    pub fn run(&self) -> Result<ReturnEvent, SearchError> {
        // Every transition either finishes, consumes a horizon step or
        // consumes an iteration, so this bound is never the one that stops.
        let bound = self.max_steps as usize + self.config.max_iterations as usize + 4;
        let mut state = self.initial_state();
        for _ in 0..bound {
            if state.is_terminal() {
                break;
            }
            state = self.step(state)?;
        }
        let outcome = match state {
            ReturnState::Found {
                instant,
                delta_deg,
                iterations,
            } => ReturnOutcome::Found {
                instant,
                delta_deg,
                iterations,
            },
            ReturnState::NotFound { reason, iterations } => {
                ReturnOutcome::NotFound { reason, iterations }
            }
            ReturnState::Refining { iterations, .. } => ReturnOutcome::NotFound {
                reason: NotFoundReason::IterationBudgetExhausted,
                iterations,
            },
            ReturnState::Searching { .. } | ReturnState::Bracketed { .. } => {
                ReturnOutcome::NotFound {
                    reason: NotFoundReason::HorizonExhausted,
                    iterations: 0,
                }
            }
        };
        Ok(ReturnEvent {
            body: self.body,
            target_longitude_deg: self.target_deg,
            ayanamsha: self.ayanamsha,
            search_start: self.start,
            outcome,
        })
    }
}

/// Next return of any graha to its natal sidereal longitude, searched from
/// `from` in the natal chart's ayanamsha.
pub fn planetary_return(
    ephemeris: &dyn Ephemeris,
    natal: &Chart,
    graha: Graha,
    from: Instant,
    config: ReturnConfig,
) -> Result<ReturnEvent, SearchError> {
    ReturnFinder::new(
        ephemeris,
        graha.body(),
        natal.longitude(graha),
        from,
        natal.ayanamsha,
        config,
    )?
    .run()
}

pub fn solar_return(
    ephemeris: &dyn Ephemeris,
    natal: &Chart,
    from: Instant,
    config: ReturnConfig,
) -> Result<ReturnEvent, SearchError> {
    planetary_return(ephemeris, natal, Graha::Surya, from, config)
}

pub fn lunar_return(
    ephemeris: &dyn Ephemeris,
    natal: &Chart,
    from: Instant,
    config: ReturnConfig,
) -> Result<ReturnEvent, SearchError> {
    planetary_return(ephemeris, natal, Graha::Chandra, from, config)
}
