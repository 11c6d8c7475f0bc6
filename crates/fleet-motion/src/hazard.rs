//! Seeded scenario generator for delay events.

use fleet_core::{SeededRandom, Timestamp};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{DelayReason, VehicleSimState};

/// Injects random delay events at a mean rate, for demos and chaos runs.
///
/// Every draw comes from the caller's [`SeededRandom`], so a run replays
/// exactly from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct HazardGenerator {
    /// Mean events per simulated hour of driving.
    pub events_per_hour:      f64,
    pub min_duration_minutes: f64,
    pub max_duration_minutes: f64,
    /// Candidate reasons, picked uniformly.  Empty disables injection.
    pub reasons:              Vec<DelayReason>,
}

impl Default for HazardGenerator {
    fn default() -> Self {
        Self {
            events_per_hour:      0.5,
            min_duration_minutes: 5.0,
            max_duration_minutes: 30.0,
            reasons:              DelayReason::KNOWN.to_vec(),
        }
    }
}

impl HazardGenerator {
    /// A generator that never fires.
    pub fn disabled() -> Self {
        Self { events_per_hour: 0.0, reasons: Vec::new(), ..Self::default() }
    }

    /// Chance of an event in a tick of `delta_secs`, in `[0, 1]`.
    pub fn probability(&self, delta_secs: f64) -> f64 {
        let p = self.events_per_hour * delta_secs / 3_600.0;
        if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
    }

    /// Possibly add one delay event to `state` for this tick.
    ///
    /// Complete vehicles are never touched, and no random number is drawn
    /// when injection is impossible.
    pub fn maybe_inject(
        &self,
        state:      &VehicleSimState,
        delta_secs: f64,
        now:        Timestamp,
        rng:        &mut SeededRandom,
    ) -> VehicleSimState {
        let p = self.probability(delta_secs);
        if state.is_complete() || self.reasons.is_empty() || p <= 0.0 {
            return state.clone();
        }
        if !rng.gen_bool(p) {
            return state.clone();
        }

        let Some(reason) = self.reasons.choose(rng) else {
            return state.clone();
        };
        let (min, max) = (self.min_duration_minutes, self.max_duration_minutes);
        let duration = if min.is_finite() && max.is_finite() && max > min {
            rng.gen_range(min..max)
        } else if min.is_finite() {
            min.max(0.0)
        } else {
            0.0
        };

        state.with_delay_event(reason.clone(), duration, now)
    }
}
