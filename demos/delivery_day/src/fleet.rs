//! Synthetic delivery day: one depot, three vans, a handful of drops each,
//! loosely placed around Lagos Island and the mainland.

use fleet_core::{Coordinate, FacilityId, VehicleId};

pub const DEPOT: Coordinate = Coordinate { lon: 3.3515, lat: 6.4550 };

/// Congestion zones, same format as a zones file on disk.
pub const ZONES_CSV: &str = "\
name,lon,lat,radius_m,speed_multiplier\n\
balogun_market,3.3886,6.4541,1200,0.45\n\
apapa_port,3.3615,6.4474,2500,0.6\n\
ikeja_along,3.3515,6.6050,1500,0.7\n\
third_mainland,3.3950,6.5000,3000,0.85\n\
";

pub struct DropOff {
    pub facility:      FacilityId,
    pub at:            Coordinate,
    pub dwell_minutes: f64,
    pub quantity:      f64,
}

pub struct VanPlan {
    pub vehicle: VehicleId,
    pub drops:   Vec<DropOff>,
}

fn stop(facility: u32, lon: f64, lat: f64, dwell_minutes: f64, quantity: f64) -> DropOff {
    DropOff { facility: FacilityId(facility), at: Coordinate::new(lon, lat), dwell_minutes, quantity }
}

/// Drops are listed unordered; the solver decides the visiting order.
pub fn plans() -> Vec<VanPlan> {
    vec![
        VanPlan {
            vehicle: VehicleId(0),
            drops:   vec![
                stop(101, 3.3890, 6.4530, 12.0, 40.0),
                stop(102, 3.4210, 6.4320, 8.0, 25.0),
                stop(103, 3.3700, 6.4600, 10.0, 30.0),
                stop(104, 3.4050, 6.4480, 6.0, 15.0),
            ],
        },
        VanPlan {
            vehicle: VehicleId(1),
            drops:   vec![
                stop(201, 3.3510, 6.6000, 15.0, 60.0),
                stop(202, 3.3620, 6.5800, 10.0, 20.0),
                stop(203, 3.3300, 6.5550, 8.0, 35.0),
                stop(204, 3.3750, 6.5300, 5.0, 10.0),
                stop(205, 3.3450, 6.6150, 12.0, 45.0),
            ],
        },
        VanPlan {
            vehicle: VehicleId(2),
            drops:   vec![
                stop(301, 3.3610, 6.4470, 20.0, 80.0),
                stop(302, 3.3200, 6.4650, 10.0, 30.0),
                stop(303, 3.2950, 6.4700, 10.0, 25.0),
            ],
        },
    ]
}
