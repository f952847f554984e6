//! Transit scanning: passes of moving grahas through aspect orbs to natal
//! positions.
//!
//! Algorithm: sample each transiting graha's sidereal longitude at a fixed
//! step over the range, then for every natal graha and every aspect walk
//! the samples looking for runs inside the orb. Each run is one event. Its
//! peak is refined by bisection on the signed deviation when the aspect
//! perfects between two samples, otherwise by a parabola through the three
//! samples around the closest one. Entry and exit are bisected on
//! `deviation − orb`.
//!
//! The step used for a graha never exceeds the narrowest orb divided by the
//! graha's fastest daily motion, so every pass has at least one sample in
//! orb. When `max_samples` forces a coarser step anyway, a pass that
//! perfects between two out-of-orb samples is still found from the sign
//! change of the signed deviation.

use kundali_core::Ephemeris;
use kundali_time::Instant;
use kundali_vedic_base::{ALL_GRAHAS, Aspect, AspectTable, AyanamshaSystem, Chart, Graha};
use tracing::{debug, warn};

use crate::error::SearchError;
use crate::search_util::{
    Sample, check_coverage, graha_longitude, is_genuine_crossing, midpoint, parabolic_vertex,
    signed_aspect_deviation,
};
use crate::transit_types::{TransitConfig, TransitEvent};

/// Scans a date range for transit aspects to one natal chart.
pub struct TransitScanner<'a> {
    ephemeris: &'a dyn Ephemeris,
    aspects: AspectTable,
    config: TransitConfig,
}

/// Evaluation context for one (transiting, natal, aspect) triple.
struct Target<'t> {
    transiting: Graha,
    natal: Graha,
    natal_lon: f64,
    aspect: &'t Aspect,
    ayanamsha: AyanamshaSystem,
}

impl<'a> TransitScanner<'a> {
    pub fn new(
        ephemeris: &'a dyn Ephemeris,
        aspects: AspectTable,
        config: TransitConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        aspects.validate()?;
        Ok(Self {
            ephemeris,
            aspects,
            config,
        })
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    /// Sampling step for one transiting graha: the configured step, shortened
    /// so the graha cannot cross the narrowest orb between two samples.
    pub fn step_for(&self, graha: Graha) -> f64 {
        let narrowest = self
            .aspects
            .aspects()
            .iter()
            .map(|a| a.orb_deg)
            .fold(f64::INFINITY, f64::min);
        self.config
            .step_days
            .min(narrowest / graha.body().max_daily_motion_deg())
    }

    /// Sample instants covering `[from, to]` with a uniform step no longer
    /// than `step_days`, unless `max_samples` forces it.
    fn sample_times(&self, from: Instant, to: Instant, step_days: f64) -> Vec<Instant> {
        let span = to.days_since(from);
        let mut steps = (span / step_days).ceil().max(1.0) as u32;
        let cap = self.config.max_samples - 1;
        if steps > cap {
            warn!(
                requested = steps + 1,
                max_samples = self.config.max_samples,
                "transit range too long for the step, sampling more coarsely"
            );
            steps = cap;
        }
        let step = span / f64::from(steps);
        (0..=steps)
            .map(|k| {
                if k == steps {
                    to
                } else {
                    from.add_days(f64::from(k) * step)
                }
            })
            .collect()
    }

    /// All events for the given transiting grahas against every natal graha,
    /// ordered by peak instant.
    pub fn scan(
        &self,
        natal: &Chart,
        transiting: &[Graha],
        from: Instant,
        to: Instant,
    ) -> Result<Vec<TransitEvent>, SearchError> {
        if !(to > from) {
            return Err(SearchError::InvalidInput("transit range end must follow its start"));
        }
        check_coverage(self.ephemeris, from, to)?;

        let mut events = Vec::new();
        let mut samples = 0;
        for &moving in transiting {
            let times = self.sample_times(from, to, self.step_for(moving));
            samples += times.len();
            let lons = times
                .iter()
                .map(|&t| graha_longitude(self.ephemeris, t, moving, natal.ayanamsha))
                .collect::<Result<Vec<f64>, _>>()?;

            for fixed in ALL_GRAHAS {
                for aspect in self.aspects.aspects() {
                    let target = Target {
                        transiting: moving,
                        natal: fixed,
                        natal_lon: natal.longitude(fixed),
                        aspect,
                        ayanamsha: natal.ayanamsha,
                    };
                    let signed: Vec<f64> = lons
                        .iter()
                        .map(|&lon| {
                            signed_aspect_deviation(lon, target.natal_lon, aspect.angle_deg)
                        })
                        .collect();
                    for pass in passes(&signed, aspect.orb_deg) {
                        let event = match pass {
                            Pass::InOrb(k0, k1) => {
                                Some(self.refine_run(&target, &times, &signed, k0, k1)?)
                            }
                            Pass::Between(k) => {
                                self.refine_between(&target, &times, &signed, k)?
                            }
                        };
                        events.extend(event);
                    }
                }
            }
        }

        events.sort_by(|a, b| {
            a.peak
                .jd_ut()
                .total_cmp(&b.peak.jd_ut())
                .then(a.transiting.cmp(&b.transiting))
                .then(a.natal.cmp(&b.natal))
        });
        debug!(
            events = events.len(),
            samples,
            from = from.jd_ut(),
            to = to.jd_ut(),
            "transit scan finished"
        );
        Ok(events)
    }

    fn signed_at(&self, target: &Target<'_>, t: Instant) -> Result<f64, SearchError> {
        let lon = graha_longitude(self.ephemeris, t, target.transiting, target.ayanamsha)?;
        Ok(signed_aspect_deviation(lon, target.natal_lon, target.aspect.angle_deg))
    }

    /// Bisect a sign change of `f` between `lo` and `hi`.
    fn bisect<F>(&self, f: F, mut lo: Sample, mut hi: Sample) -> Result<Instant, SearchError>
    where
        F: Fn(Instant) -> Result<f64, SearchError>,
    {
        for _ in 0..self.config.max_iterations {
            let mid = midpoint(lo.instant, hi.instant);
            let fm = f(mid)?;
            if lo.value * fm <= 0.0 {
                hi = Sample::new(mid, fm);
            } else {
                lo = Sample::new(mid, fm);
            }
            if hi.instant.days_since(lo.instant).abs() < self.config.convergence_days {
                break;
            }
        }
        Ok(midpoint(lo.instant, hi.instant))
    }

    fn refine_run(
        &self,
        target: &Target<'_>,
        times: &[Instant],
        signed: &[f64],
        k0: usize,
        k1: usize,
    ) -> Result<TransitEvent, SearchError> {
        let last = signed.len() - 1;
        let kmin = (k0..=k1)
            .min_by(|&a, &b| signed[a].abs().total_cmp(&signed[b].abs()))
            .unwrap_or(k0);

        let sample = |k: usize| Sample::new(times[k], signed[k]);
        let bracket = [
            (kmin > 0).then(|| (kmin - 1, kmin)),
            (kmin < last).then_some((kmin, kmin + 1)),
        ]
        .into_iter()
        .flatten()
        .find(|&(a, b)| is_genuine_crossing(signed[a], signed[b]));

        let (peak, perfected) = match bracket {
            Some((a, b)) => {
                let t = self.bisect(|t| self.signed_at(target, t), sample(a), sample(b))?;
                (t, true)
            }
            None if kmin > 0 && kmin < last => {
                let offset = parabolic_vertex(
                    signed[kmin - 1].abs(),
                    signed[kmin].abs(),
                    signed[kmin + 1].abs(),
                );
                let step = if offset < 0.0 {
                    times[kmin].days_since(times[kmin - 1])
                } else {
                    times[kmin + 1].days_since(times[kmin])
                };
                let t = times[kmin].add_days(offset * step);
                if self.signed_at(target, t)?.abs() < signed[kmin].abs() {
                    (t, false)
                } else {
                    (times[kmin], false)
                }
            }
            None => (times[kmin], false),
        };

        let orb = target.aspect.orb_deg;
        let excess = |t: Instant| -> Result<f64, SearchError> {
            Ok(self.signed_at(target, t)?.abs() - orb)
        };
        let outside_orb = |k: usize| Sample::new(times[k], signed[k].abs() - orb);
        let entry = if k0 > 0 {
            Some(self.bisect(&excess, outside_orb(k0 - 1), outside_orb(k0))?)
        } else {
            None
        };
        let exit = if k1 < last {
            Some(self.bisect(&excess, outside_orb(k1), outside_orb(k1 + 1))?)
        } else {
            None
        };

        Ok(TransitEvent {
            transiting: target.transiting,
            natal: target.natal,
            aspect: target.aspect.name.clone(),
            aspect_angle_deg: target.aspect.angle_deg,
            orb_at_detection_deg: signed[k0].abs(),
            peak,
            orb_at_peak_deg: self.signed_at(target, peak)?.abs(),
            perfected,
            entry,
            exit,
        })
    }

    /// A pass that perfects strictly between samples `k` and `k + 1`, both
    /// out of orb. Sign changes where the nearer aspect branch switches are
    /// rejected: the deviation there stays far outside the orb.
    fn refine_between(
        &self,
        target: &Target<'_>,
        times: &[Instant],
        signed: &[f64],
        k: usize,
    ) -> Result<Option<TransitEvent>, SearchError> {
        let lo = Sample::new(times[k], signed[k]);
        let hi = Sample::new(times[k + 1], signed[k + 1]);
        let peak = self.bisect(|t| self.signed_at(target, t), lo, hi)?;
        let orb_at_peak = self.signed_at(target, peak)?.abs();
        let orb = target.aspect.orb_deg;
        if orb_at_peak > orb {
            return Ok(None);
        }

        let excess = |t: Instant| -> Result<f64, SearchError> {
            Ok(self.signed_at(target, t)?.abs() - orb)
        };
        let inside = Sample::new(peak, orb_at_peak - orb);
        let outside_orb = |j: usize| Sample::new(times[j], signed[j].abs() - orb);
        let entry = self.bisect(&excess, outside_orb(k), inside)?;
        let exit = self.bisect(&excess, inside, outside_orb(k + 1))?;

        Ok(Some(TransitEvent {
            transiting: target.transiting,
            natal: target.natal,
            aspect: target.aspect.name.clone(),
            aspect_angle_deg: target.aspect.angle_deg,
            orb_at_detection_deg: orb_at_peak,
            peak,
            orb_at_peak_deg: orb_at_peak,
            perfected: true,
            entry: Some(entry),
            exit: Some(exit),
        }))
    }
}

/// One candidate pass through an orb, located on the sample grid.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pass {
    /// Inclusive index run of samples inside the orb.
    InOrb(usize, usize),
    /// Samples `k` and `k + 1` are both outside the orb but the signed
    /// deviation changes sign between them.
    Between(usize),
}

/// Candidate passes in sample order.
fn passes(signed: &[f64], orb: f64) -> Vec<Pass> {
    let mut found = Vec::new();
    let mut start = None;
    for (k, s) in signed.iter().enumerate() {
        match (s.abs() <= orb, start) {
            (true, None) => start = Some(k),
            (false, Some(k0)) => {
                found.push(Pass::InOrb(k0, k - 1));
                start = None;
            }
            (false, None) if k > 0 => {
                let prev = signed[k - 1];
                if prev.abs() > orb && is_genuine_crossing(prev, *s) {
                    found.push(Pass::Between(k - 1));
                }
            }
            _ => {}
        }
    }
    if let Some(k0) = start {
        found.push(Pass::InOrb(k0, signed.len() - 1));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_are_split_on_exit() {
        let s = [9.0, 7.0, 1.0, -3.0, 10.0, 2.0, 2.5];
        assert_eq!(passes(&s, 8.0), vec![Pass::InOrb(1, 3), Pass::InOrb(5, 6)]);
        assert!(passes(&[20.0, 30.0], 8.0).is_empty());
    }

    #[test]
    fn sign_change_between_out_of_orb_samples_is_a_pass() {
        let s = [-20.0, -7.0, 6.0, 19.0];
        assert_eq!(passes(&s, 5.0), vec![Pass::Between(1)]);
        // The jump from +180 to -180 is not a crossing.
        assert!(passes(&[170.0, -175.0], 5.0).is_empty());
    }

    #[test]
    fn step_shrinks_with_daily_motion() {
        use kundali_core::AnalyticEphemeris;

        let eph = AnalyticEphemeris::default();
        let scanner =
            TransitScanner::new(&eph, AspectTable::default(), TransitConfig::default()).unwrap();
        // Narrowest default orb is the 5° sextile.
        assert!((scanner.step_for(Graha::Chandra) - 5.0 / 16.0).abs() < 1e-12);
        assert_eq!(scanner.step_for(Graha::Shani), 1.0);
    }
}
