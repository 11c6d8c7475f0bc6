//! Fluent, validating builder for [`VehicleSimState`].
//!
//! # Usage
//!
//! ```rust
//! use fleet_core::{Coordinate, FacilityId, VehicleId};
//! use fleet_motion::{DeliveryWaypoint, VehicleSimBuilder};
//!
//! let route = vec![
//!     Coordinate::new(3.37, 6.45),
//!     Coordinate::new(3.38, 6.46),
//!     Coordinate::new(3.39, 6.46),
//! ];
//! let state = VehicleSimBuilder::new(VehicleId(0), route)
//!     .waypoints(vec![DeliveryWaypoint::new(1, FacilityId(7), 5.0, 40.0)])
//!     .base_speed_kmh(30.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(state.current_capacity, 40.0);
//! ```

use std::sync::Arc;

use fleet_core::{Coordinate, SimConfig, VehicleId};

use crate::{DeliveryWaypoint, MotionError, MotionResult, VehicleSimState};

const DEFAULT_BASE_SPEED_KMH: f64 = 40.0;
const DEFAULT_CAPACITY: f64 = 100.0;

/// Collects a vehicle's route and delivery plan, then checks them once in
/// [`build`](Self::build).
pub struct VehicleSimBuilder {
    vehicle:          VehicleId,
    route:            Vec<Coordinate>,
    waypoints:        Vec<DeliveryWaypoint>,
    base_speed_kmh:   f64,
    default_capacity: f64,
}

impl VehicleSimBuilder {
    /// Start a builder for `vehicle` driving `route` in order.
    pub fn new(vehicle: VehicleId, route: Vec<Coordinate>) -> Self {
        Self {
            vehicle,
            route,
            waypoints: Vec::new(),
            base_speed_kmh: DEFAULT_BASE_SPEED_KMH,
            default_capacity: DEFAULT_CAPACITY,
        }
    }

    /// Delivery stops, in the order they are visited.
    pub fn waypoints(mut self, waypoints: Vec<DeliveryWaypoint>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn base_speed_kmh(mut self, kmh: f64) -> Self {
        self.base_speed_kmh = kmh;
        self
    }

    /// Capacity for a route with no waypoints.  Ignored otherwise.
    pub fn default_capacity(mut self, capacity: f64) -> Self {
        self.default_capacity = capacity;
        self
    }

    /// Take base speed and default capacity from the run configuration.
    pub fn with_config(self, config: &SimConfig) -> Self {
        self.base_speed_kmh(config.base_speed_kmh)
            .default_capacity(config.default_capacity)
    }

    /// Validate and produce the initial state at the first route point.
    pub fn build(self) -> MotionResult<VehicleSimState> {
        let vehicle = self.vehicle;

        if self.route.len() < 2 {
            return Err(MotionError::RouteTooShort { vehicle, points: self.route.len() });
        }
        if !self.base_speed_kmh.is_finite() || self.base_speed_kmh < 0.0 {
            return Err(MotionError::InvalidSpeed { vehicle, speed: self.base_speed_kmh });
        }

        for (i, w) in self.waypoints.iter().enumerate() {
            if w.route_index >= self.route.len() {
                return Err(MotionError::WaypointOutOfRange {
                    vehicle,
                    waypoint:    i,
                    route_index: w.route_index,
                    route_len:   self.route.len(),
                });
            }
            if !w.dwell_minutes.is_finite() || w.dwell_minutes < 0.0 {
                return Err(MotionError::InvalidWaypoint {
                    vehicle,
                    waypoint: i,
                    reason:   format!("dwell time {} min is not a non-negative number", w.dwell_minutes),
                });
            }
            if !w.quantity.is_finite() || w.quantity < 0.0 {
                return Err(MotionError::InvalidWaypoint {
                    vehicle,
                    waypoint: i,
                    reason:   format!("quantity {} is not a non-negative number", w.quantity),
                });
            }
        }

        // Route order: the engine only ever looks forward.
        if let Some(i) = self.waypoints
            .windows(2)
            .position(|pair| pair[1].route_index < pair[0].route_index)
        {
            return Err(MotionError::InvalidWaypoint {
                vehicle,
                waypoint: i + 1,
                reason:   "waypoints must be listed in route order".to_owned(),
            });
        }

        Ok(VehicleSimState::initial(
            vehicle,
            Arc::from(self.route),
            Arc::from(self.waypoints),
            self.base_speed_kmh,
            self.default_capacity,
        ))
    }
}
