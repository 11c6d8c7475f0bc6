//! The per-tick motion step.

use fleet_core::{SeededRandom, Timestamp, bearing, interpolate};
use fleet_traffic::SpeedModel;

use crate::VehicleSimState;

/// What happens to distance left over when a tick carries the vehicle past
/// the end of a segment.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum RolloverPolicy {
    /// Spend the overshoot on the following segments.  Travel per tick is
    /// exact for any tick length.
    #[default]
    CarryRemainder,
    /// Start the next segment at progress 0 and drop the overshoot.  At most
    /// one segment boundary is crossed per tick, so large ticks under-travel.
    Truncate,
}

/// Engine tuning shared by every vehicle of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionConfig {
    pub rollover: RolloverPolicy,

    /// Relative per-tick speed noise.  `0.1` scales each tick's speed by a
    /// factor drawn uniformly from `[0.9, 1.1)`.  `0.0` (default) disables it
    /// and leaves the RNG untouched.
    pub speed_jitter: f64,
}

/// Advances [`VehicleSimState`]s one tick at a time.
///
/// Holds only read-only reference data, so one engine can drive any number
/// of vehicles, from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct MotionEngine {
    pub speed_model: SpeedModel,
    pub config:      MotionConfig,
}

impl MotionEngine {
    pub fn new(speed_model: SpeedModel) -> Self {
        Self { speed_model, config: MotionConfig::default() }
    }

    pub fn with_config(mut self, config: MotionConfig) -> Self {
        self.config = config;
        self
    }

    /// Compute the state `delta_secs` after `state`, at wall-clock `now`.
    ///
    /// A complete vehicle is returned unchanged.  A vehicle at an undeparted
    /// waypoint arrives, or waits out its dwell time, without moving; once
    /// the dwell has elapsed it departs and travels in the same tick.
    pub fn advance(
        &self,
        state:      &VehicleSimState,
        delta_secs: f64,
        now:        Timestamp,
        rng:        &mut SeededRandom,
    ) -> VehicleSimState {
        let mut next = state.clone();
        if next.is_complete() {
            return next;
        }

        // ── Waypoint ──────────────────────────────────────────────────────
        if let Some(w) = next.pending_waypoint_at(next.segment_index) {
            match next.stops[w].arrived_at {
                None => {
                    next.arrive(w, now);
                    return next;
                }
                Some(arrived) if now.minutes_since(arrived) >= next.stops[w].dwell_minutes => {
                    next.depart(w, now);
                    // Two stops on the same point are served back to back.
                    if let Some(following) = next.pending_waypoint_at(next.segment_index) {
                        next.arrive(following, now);
                        return next;
                    }
                }
                Some(_) => {
                    next.current_speed_kmh = 0.0;
                    return next;
                }
            }
        }

        // ── Events ────────────────────────────────────────────────────────
        let before = next.active_events.len();
        next.active_events.retain(|e| !e.has_expired(now));
        if next.active_events.len() < before {
            tracing::debug!(
                vehicle = %next.vehicle,
                expired = before - next.active_events.len(),
                remaining = next.active_events.len(),
                "delay events expired"
            );
        }

        if next.next_point().is_none() {
            next.complete(now);
            return next;
        }

        // ── Speed ─────────────────────────────────────────────────────────
        let mut speed_kmh = self.speed_model.effective_speed_kmh(next.base_speed_kmh, next.position, now)
            * next.event_multiplier();
        if self.config.speed_jitter > 0.0 {
            speed_kmh *= 1.0 + self.config.speed_jitter * (2.0 * rng.next_f64() - 1.0);
        }
        let speed_kmh = speed_kmh.max(0.0);
        next.current_speed_kmh = speed_kmh;

        // ── Travel and rollover ───────────────────────────────────────────
        let mut travel_m = speed_kmh * 1_000.0 / 3_600.0 * delta_secs.max(0.0);
        loop {
            let length_m = next.segment_length_m(next.segment_index);
            let left_m = (1.0 - next.progress) * length_m;
            if travel_m < left_m {
                next.progress += travel_m / length_m;
                break;
            }

            travel_m -= left_m;
            next.segment_index += 1;
            next.progress = 0.0;

            if next.segment_index == next.last_index() {
                if next.pending_waypoint_at(next.segment_index).is_none() {
                    next.complete(now);
                    return next;
                }
                break;
            }
            if next.pending_waypoint_at(next.segment_index).is_some() {
                break;
            }
            if self.config.rollover == RolloverPolicy::Truncate {
                break;
            }
        }

        // ── Position ──────────────────────────────────────────────────────
        let from = next.route[next.segment_index];
        match next.next_point() {
            Some(to) => {
                next.position = interpolate(from, to, next.progress);
                if from != to {
                    next.bearing = bearing(from, to);
                }
            }
            None => next.position = from,
        }
        next
    }
}
