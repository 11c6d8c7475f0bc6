//! Static geographic congestion zones.

use fleet_core::{Coordinate, haversine_distance};

use crate::{TrafficError, TrafficResult};

/// A named disc that slows every vehicle inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficZone {
    pub name:             String,
    pub center:           Coordinate,
    pub radius_m:         f64,
    /// Speed factor inside the zone, in `(0, 1]`.
    pub speed_multiplier: f64,
}

impl TrafficZone {
    /// Build a zone, rejecting a negative/non-finite radius or a multiplier
    /// outside `(0, 1]`.
    pub fn new(
        name:             impl Into<String>,
        center:           Coordinate,
        radius_m:         f64,
        speed_multiplier: f64,
    ) -> TrafficResult<Self> {
        let name = name.into();
        if !(radius_m.is_finite() && radius_m >= 0.0) {
            return Err(TrafficError::InvalidZone {
                name,
                reason: format!("radius {radius_m} m must be finite and non-negative"),
            });
        }
        if !(speed_multiplier > 0.0 && speed_multiplier <= 1.0) {
            return Err(TrafficError::InvalidZone {
                name,
                reason: format!("speed multiplier {speed_multiplier} outside (0, 1]"),
            });
        }
        Ok(Self { name, center, radius_m, speed_multiplier })
    }

    /// `true` if `point` lies within `radius_m` of the centre (boundary
    /// inclusive).
    #[inline]
    pub fn contains(&self, point: Coordinate) -> bool {
        haversine_distance(self.center, point) <= self.radius_m
    }
}

/// The full set of zones for a service area.
///
/// Zones may overlap.  A point inside several zones takes the **minimum**
/// multiplier: the slowest congestion dominates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CongestionZones {
    zones: Vec<TrafficZone>,
}

impl CongestionZones {
    pub fn new(zones: Vec<TrafficZone>) -> Self {
        Self { zones }
    }

    /// No zones: every point gets multiplier `1.0`.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn zones(&self) -> &[TrafficZone] {
        &self.zones
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Zones whose disc contains `point`.
    pub fn containing(&self, point: Coordinate) -> impl Iterator<Item = &TrafficZone> {
        self.zones.iter().filter(move |z| z.contains(point))
    }

    /// Minimum multiplier among zones containing `point`, `1.0` if none do.
    pub fn multiplier_at(&self, point: Coordinate) -> f64 {
        self.containing(point)
            .map(|z| z.speed_multiplier)
            .reduce(f64::min)
            .unwrap_or(1.0)
    }
}

impl From<Vec<TrafficZone>> for CongestionZones {
    fn from(zones: Vec<TrafficZone>) -> Self {
        Self::new(zones)
    }
}
