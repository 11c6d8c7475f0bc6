//! `fleet-core`: foundational types for the fleet route-ordering and
//! vehicle-motion core.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `FacilityId`                                |
//! | [`geo`]         | `Coordinate`, haversine distance, bearing, interpolation |
//! | [`time`]        | `Timestamp`, `Weekday`, `SimClock`, `SimConfig`          |
//! | [`rng`]         | `SeededRandom` (replayable LCG)                          |
//! | [`error`]       | `FleetError`, `FleetResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                           |
//! |---------|-------------------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public value types, incl. `SimConfig`. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FleetError, FleetResult};
pub use geo::{Coordinate, EARTH_RADIUS_M, bearing, haversine_distance, interpolate};
pub use ids::{FacilityId, VehicleId};
pub use rng::SeededRandom;
pub use time::{SimClock, SimConfig, Timestamp, Weekday};
