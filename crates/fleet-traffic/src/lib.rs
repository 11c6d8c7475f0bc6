//! `fleet-traffic`: effective vehicle speed from position and wall-clock time.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`zone`]    | `TrafficZone`, `CongestionZones` (min-multiplier overlap)      |
//! | [`profile`] | `TimeBand` (hour-of-day), `day_multiplier` (day-of-week)       |
//! | [`model`]   | `SpeedModel`: composes base speed with all multipliers         |
//! | [`loader`]  | `load_zones_csv`, `load_zones_reader`                          |
//! | [`error`]   | `TrafficError`, `TrafficResult<T>`                             |
//!
//! # Composition
//!
//! ```text
//! effective = base × zone(position) × time_band(hour) × day(weekday)
//! ```
//!
//! Every factor is a pure function of its input; the model holds only static
//! reference data and is shared read-only by all vehicles.

pub mod error;
pub mod loader;
pub mod model;
pub mod profile;
pub mod zone;


pub use error::{TrafficError, TrafficResult};
pub use loader::{load_zones_csv, load_zones_reader};
pub use model::SpeedModel;
pub use profile::{TimeBand, day_multiplier};
pub use zone::{CongestionZones, TrafficZone};
