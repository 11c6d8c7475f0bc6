//! Per-vehicle simulation state.

use std::sync::Arc;

use fleet_core::{Coordinate, FacilityId, Timestamp, VehicleId, bearing, haversine_distance};

use crate::{ActiveEvent, DelayReason};

// ── Delivery data ─────────────────────────────────────────────────────────────

/// A delivery stop on the route, fixed for the whole run.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryWaypoint {
    /// Index into the route polyline where the stop is.
    pub route_index:   usize,
    pub facility:      FacilityId,
    /// Minutes the vehicle must stand at the stop before leaving.
    pub dwell_minutes: f64,
    /// Payload unloaded at the stop.
    pub quantity:      f64,
}

impl DeliveryWaypoint {
    pub fn new(route_index: usize, facility: FacilityId, dwell_minutes: f64, quantity: f64) -> Self {
        Self { route_index, facility, dwell_minutes, quantity }
    }
}

/// What actually happened at a waypoint.  One per [`DeliveryWaypoint`], same
/// index.  Written once on arrival and once on departure.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryStop {
    pub arrived_at:         Option<Timestamp>,
    pub departed_at:        Option<Timestamp>,
    pub dwell_minutes:      f64,
    /// `0.0` until departure, then the waypoint's quantity.
    pub delivered_quantity: f64,
}

impl DeliveryStop {
    fn pending(waypoint: &DeliveryWaypoint) -> Self {
        Self {
            arrived_at:         None,
            departed_at:        None,
            dwell_minutes:      waypoint.dwell_minutes,
            delivered_quantity: 0.0,
        }
    }

    #[inline]
    pub fn is_departed(&self) -> bool {
        self.departed_at.is_some()
    }
}

// ── SimPhase ──────────────────────────────────────────────────────────────────

/// Where the vehicle is in its run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum SimPhase {
    /// Moving, or able to move on the next tick.
    #[default]
    Traveling,
    /// Standing at a delivery waypoint until its dwell time elapses.
    Dwelling,
    /// Reached the last route point.  Terminal.
    Complete,
}

impl SimPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SimPhase::Traveling => "traveling",
            SimPhase::Dwelling  => "dwelling",
            SimPhase::Complete  => "complete",
        }
    }
}

impl std::fmt::Display for SimPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── VehicleSimState ───────────────────────────────────────────────────────────

/// The full simulation state of one vehicle.
///
/// Owned by exactly one driving loop.  Engine operations never mutate a state
/// in place; they return the next state, so keeping the previous value is
/// all a replay or undo needs.
///
/// Build with [`VehicleSimBuilder`][crate::VehicleSimBuilder], which
/// guarantees `route.len() >= 2` and in-range waypoints.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSimState {
    pub vehicle: VehicleId,

    /// Ordered route polyline.  Shared, never modified.
    pub route: Arc<[Coordinate]>,

    /// Index of the route point the current segment starts at.
    pub segment_index: usize,

    /// Fraction of the current segment covered, in `[0, 1)`.
    pub progress: f64,

    pub position: Coordinate,

    /// Heading in degrees `[0, 360)`, for icon orientation.
    pub bearing: f64,

    /// Cruising speed before traffic and events, km/h.
    pub base_speed_kmh: f64,

    /// Speed applied on the last tick, km/h.  `0.0` while dwelling or done.
    pub current_speed_kmh: f64,

    pub phase: SimPhase,

    pub active_events: Vec<ActiveEvent>,

    /// Delivery stops in route order.  Shared, never modified.
    pub waypoints: Arc<[DeliveryWaypoint]>,

    /// Progress at each waypoint; `stops[i]` belongs to `waypoints[i]`.
    pub stops: Vec<DeliveryStop>,

    /// Payload still on board.
    pub current_capacity: f64,

    /// Capacity used on reset when the route has no waypoints.
    pub default_capacity: f64,
}

impl VehicleSimState {
    /// Fresh state at the first route point.  Callers validate the inputs.
    pub(crate) fn initial(
        vehicle:          VehicleId,
        route:            Arc<[Coordinate]>,
        waypoints:        Arc<[DeliveryWaypoint]>,
        base_speed_kmh:   f64,
        default_capacity: f64,
    ) -> Self {
        let current_capacity = if waypoints.is_empty() {
            default_capacity
        } else {
            waypoints.iter().map(|w| w.quantity).sum()
        };
        let stops = waypoints.iter().map(DeliveryStop::pending).collect();

        Self {
            vehicle,
            segment_index: 0,
            progress: 0.0,
            position: route[0],
            bearing: bearing(route[0], route[1]),
            base_speed_kmh,
            current_speed_kmh: 0.0,
            phase: SimPhase::Traveling,
            active_events: Vec::new(),
            stops,
            current_capacity,
            default_capacity,
            route,
            waypoints,
        }
    }

    /// A fresh state for the same vehicle, route and waypoints.
    ///
    /// Capacity is recomputed as the sum of waypoint quantities, or
    /// `default_capacity` when the route has no waypoints.
    pub fn reset(&self) -> Self {
        Self::initial(
            self.vehicle,
            Arc::clone(&self.route),
            Arc::clone(&self.waypoints),
            self.base_speed_kmh,
            self.default_capacity,
        )
    }

    /// Return a copy with a new delay event active from `now` for
    /// `duration_minutes`.
    ///
    /// Does not pause anything by itself; the next
    /// [`advance`][crate::MotionEngine::advance] applies the slowdown.
    pub fn with_delay_event(&self, reason: DelayReason, duration_minutes: f64, now: Timestamp) -> Self {
        tracing::debug!(
            vehicle = %self.vehicle,
            reason = %reason,
            duration_minutes,
            "delay event added"
        );
        let mut next = self.clone();
        next.active_events.push(ActiveEvent::new(reason, duration_minutes, now));
        next
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == SimPhase::Complete
    }

    #[inline]
    pub fn is_dwelling(&self) -> bool {
        self.phase == SimPhase::Dwelling
    }

    /// Index of the final route point.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.route.len() - 1
    }

    /// The point the current segment ends at, `None` at the end of the route.
    #[inline]
    pub fn next_point(&self) -> Option<Coordinate> {
        self.route.get(self.segment_index + 1).copied()
    }

    /// Haversine length of the segment starting at route index `index`, or
    /// `0.0` past the end.
    pub fn segment_length_m(&self, index: usize) -> f64 {
        match (self.route.get(index), self.route.get(index + 1)) {
            (Some(&a), Some(&b)) => haversine_distance(a, b),
            _ => 0.0,
        }
    }

    /// Route distance still to drive, metres.
    pub fn remaining_distance_m(&self) -> f64 {
        if self.is_complete() {
            return 0.0;
        }
        let current = (1.0 - self.progress) * self.segment_length_m(self.segment_index);
        let rest: f64 = (self.segment_index + 1..self.last_index())
            .map(|i| self.segment_length_m(i))
            .sum();
        current + rest
    }

    /// First waypoint at route index `index` that has not been departed.
    pub fn pending_waypoint_at(&self, index: usize) -> Option<usize> {
        self.waypoints
            .iter()
            .zip(&self.stops)
            .position(|(w, s)| w.route_index == index && !s.is_departed())
    }

    /// Most restrictive multiplier among active events, `1.0` if none.
    pub fn event_multiplier(&self) -> f64 {
        self.active_events
            .iter()
            .map(|e| e.speed_multiplier)
            .reduce(f64::min)
            .unwrap_or(1.0)
    }

    /// Total payload unloaded so far.
    pub fn delivered_total(&self) -> f64 {
        self.stops.iter().map(|s| s.delivered_quantity).sum()
    }

    /// Number of waypoints already departed.
    pub fn completed_stops(&self) -> usize {
        self.stops.iter().filter(|s| s.is_departed()).count()
    }

    // ── Transitions (engine only) ─────────────────────────────────────────

    pub(crate) fn arrive(&mut self, waypoint: usize, now: Timestamp) {
        self.stops[waypoint].arrived_at = Some(now);
        self.phase = SimPhase::Dwelling;
        self.current_speed_kmh = 0.0;
        tracing::debug!(
            vehicle = %self.vehicle,
            facility = %self.waypoints[waypoint].facility,
            route_index = self.waypoints[waypoint].route_index,
            "arrived at waypoint"
        );
    }

    pub(crate) fn depart(&mut self, waypoint: usize, now: Timestamp) {
        let quantity = self.waypoints[waypoint].quantity;
        let stop = &mut self.stops[waypoint];
        stop.departed_at = Some(now);
        stop.delivered_quantity = quantity;
        self.current_capacity -= quantity;
        self.phase = SimPhase::Traveling;
        tracing::debug!(
            vehicle = %self.vehicle,
            facility = %self.waypoints[waypoint].facility,
            quantity,
            remaining = self.current_capacity,
            "departed waypoint"
        );
    }

    pub(crate) fn complete(&mut self, now: Timestamp) {
        self.segment_index = self.last_index();
        self.progress = 0.0;
        self.position = self.route[self.segment_index];
        self.current_speed_kmh = 0.0;
        self.phase = SimPhase::Complete;
        tracing::info!(
            vehicle = %self.vehicle,
            at = %now,
            delivered = self.delivered_total(),
            "route complete"
        );
    }
}
