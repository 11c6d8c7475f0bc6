//! Transient delay events.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use fleet_core::Timestamp;

/// Why a vehicle is being slowed.
///
/// Parsed from the hazard feed's string codes; unrecognised codes are kept
/// verbatim as `Other` and get a moderate slowdown.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DelayReason {
    TrafficJam,
    RoadObstruction,
    VehicleBreakdown,
    FuelStop,
    Other(String),
}

impl DelayReason {
    /// The four reasons with a dedicated multiplier.
    pub const KNOWN: [DelayReason; 4] = [
        DelayReason::TrafficJam,
        DelayReason::RoadObstruction,
        DelayReason::VehicleBreakdown,
        DelayReason::FuelStop,
    ];

    /// Speed factor while the event is active, in `[0, 1]`.
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            DelayReason::TrafficJam => 0.4,
            DelayReason::RoadObstruction | DelayReason::VehicleBreakdown | DelayReason::FuelStop => 0.0,
            DelayReason::Other(_) => 0.5,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DelayReason::TrafficJam       => "traffic_jam",
            DelayReason::RoadObstruction  => "road_obstruction",
            DelayReason::VehicleBreakdown => "vehicle_breakdown",
            DelayReason::FuelStop         => "fuel_stop",
            DelayReason::Other(code)      => code,
        }
    }
}

impl FromStr for DelayReason {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "traffic_jam"       => DelayReason::TrafficJam,
            "road_obstruction"  => DelayReason::RoadObstruction,
            "vehicle_breakdown" => DelayReason::VehicleBreakdown,
            "fuel_stop"         => DelayReason::FuelStop,
            other               => DelayReason::Other(other.to_owned()),
        })
    }
}

impl From<&str> for DelayReason {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(reason) => reason,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for DelayReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delay currently affecting one vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveEvent {
    pub reason:           DelayReason,
    pub started_at:       Timestamp,
    /// The event stops applying at this instant.
    pub ends_at:          Timestamp,
    pub speed_multiplier: f64,
}

impl ActiveEvent {
    /// An event for `reason` lasting `duration_minutes` from `now`.
    pub fn new(reason: DelayReason, duration_minutes: f64, now: Timestamp) -> Self {
        Self {
            speed_multiplier: reason.speed_multiplier(),
            started_at:       now,
            ends_at:          now.plus_minutes(duration_minutes),
            reason,
        }
    }

    /// `true` once `now` has reached `ends_at`.
    #[inline]
    pub fn has_expired(&self, now: Timestamp) -> bool {
        self.ends_at <= now
    }
}
