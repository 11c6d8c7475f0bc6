//! Plain data rows written by output backends.

use fleet_core::Timestamp;
use fleet_motion::VehicleSimState;

/// One vehicle at one tick: what a map renderer needs to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub vehicle_id:    u32,
    pub tick:          u64,
    pub timestamp_ms:  i64,
    pub lon:           f64,
    pub lat:           f64,
    /// Degrees clockwise from north, `[0, 360)`.
    pub bearing:       f64,
    pub speed_kmh:     f64,
    /// `traveling`, `dwelling` or `complete`.
    pub phase:         &'static str,
    pub segment_index: usize,
    pub capacity:      f64,
    pub active_events: usize,
}

impl TrackRow {
    pub fn from_state(tick: u64, now: Timestamp, state: &VehicleSimState) -> Self {
        Self {
            vehicle_id:    state.vehicle.0,
            tick,
            timestamp_ms:  now.0,
            lon:           state.position.lon,
            lat:           state.position.lat,
            bearing:       state.bearing,
            speed_kmh:     state.current_speed_kmh,
            phase:         state.phase.as_str(),
            segment_index: state.segment_index,
            capacity:      state.current_capacity,
            active_events: state.active_events.len(),
        }
    }
}

/// Outcome at one delivery waypoint, written once per waypoint at the end of
/// a run.
#[derive(Debug, Clone, PartialEq)]
pub struct StopRow {
    pub vehicle_id:         u32,
    pub facility_id:        u32,
    pub route_index:        usize,
    /// `None` if the vehicle never got there.
    pub arrived_at_ms:      Option<i64>,
    pub departed_at_ms:     Option<i64>,
    pub dwell_minutes:      f64,
    pub delivered_quantity: f64,
}

impl StopRow {
    /// One row per waypoint of `state`, in route order.
    pub fn from_state(state: &VehicleSimState) -> Vec<Self> {
        state
            .waypoints
            .iter()
            .zip(&state.stops)
            .map(|(w, s)| Self {
                vehicle_id:         state.vehicle.0,
                facility_id:        w.facility.0,
                route_index:        w.route_index,
                arrived_at_ms:      s.arrived_at.map(|t| t.0),
                departed_at_ms:     s.departed_at.map(|t| t.0),
                dwell_minutes:      s.dwell_minutes,
                delivered_quantity: s.delivered_quantity,
            })
            .collect()
    }
}
