use fleet_core::VehicleId;
use thiserror::Error;

/// Construction-time failures.  A vehicle that fails to build never starts
/// simulating.
#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    #[error("{vehicle}: route has {points} point(s), at least 2 are required")]
    RouteTooShort { vehicle: VehicleId, points: usize },

    #[error("{vehicle}: waypoint {waypoint} targets route index {route_index}, route has {route_len} points")]
    WaypointOutOfRange {
        vehicle:     VehicleId,
        waypoint:    usize,
        route_index: usize,
        route_len:   usize,
    },

    #[error("{vehicle}: waypoint {waypoint}: {reason}")]
    InvalidWaypoint { vehicle: VehicleId, waypoint: usize, reason: String },

    #[error("{vehicle}: base speed {speed} km/h must be finite and non-negative")]
    InvalidSpeed { vehicle: VehicleId, speed: f64 },
}

pub type MotionResult<T> = Result<T, MotionError>;
