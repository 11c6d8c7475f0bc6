//! The composed speed model.

use fleet_core::{Coordinate, Timestamp};

use crate::{CongestionZones, TimeBand, day_multiplier};

/// Effective speed for a vehicle at a place and time.
///
/// Holds only static reference data; share one instance (by reference or
/// `Arc`) between every vehicle of a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpeedModel {
    pub zones:           CongestionZones,
    /// Offset applied to timestamps before deriving hour and weekday.
    pub utc_offset_secs: i32,
}

impl SpeedModel {
    pub fn new(zones: CongestionZones, utc_offset_secs: i32) -> Self {
        Self { zones, utc_offset_secs }
    }

    /// Hour-of-day band at `now`, local time.
    #[inline]
    pub fn time_band(&self, now: Timestamp) -> TimeBand {
        TimeBand::from_hour(now.hour_of_day(self.utc_offset_secs))
    }

    /// `base_kmh` scaled by zone, hour and weekday, km/h.
    pub fn effective_speed_kmh(&self, base_kmh: f64, position: Coordinate, now: Timestamp) -> f64 {
        base_kmh
            * self.zones.multiplier_at(position)
            * self.time_band(now).multiplier()
            * day_multiplier(now.weekday(self.utc_offset_secs))
    }
}
