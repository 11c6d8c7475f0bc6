//! `fleet-motion`: vehicle movement along an ordered delivery route.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`state`]   | `VehicleSimState`, `DeliveryWaypoint`, `DeliveryStop`, `SimPhase` |
//! | [`event`]   | `DelayReason`, `ActiveEvent`                                      |
//! | [`builder`] | `VehicleSimBuilder`: validated construction                       |
//! | [`engine`]  | `MotionEngine`: the per-tick `advance` step                       |
//! | [`hazard`]  | `HazardGenerator`: seeded random delay injection                  |
//! | [`error`]   | `MotionError`, `MotionResult<T>`                                  |
//!
//! # Movement model (per-tick advance)
//!
//! Each vehicle is a small state machine, `Traveling → Dwelling → Traveling
//! → … → Complete`, driven by repeated calls to
//! [`MotionEngine::advance`]:
//!
//! 1. A vehicle sitting on an undeparted delivery waypoint arrives, dwells
//!    for the waypoint's dwell time, then departs and unloads its quantity.
//! 2. Expired delay events are dropped.
//! 3. Speed = base × traffic/time factors × the most restrictive active
//!    event.
//! 4. Distance travelled this tick becomes segment progress; whole segments
//!    roll over, and the vehicle halts at the start of any segment that
//!    carries a pending waypoint.
//! 5. Position and bearing are interpolated for the renderer.
//!
//! Every operation takes `&VehicleSimState` and returns a new value.  The
//! route and waypoint lists are shared `Arc` slices, so the per-tick clone
//! copies only the small mutable parts.

pub mod builder;
pub mod engine;
pub mod error;
pub mod event;
pub mod hazard;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::VehicleSimBuilder;
pub use engine::{MotionConfig, MotionEngine, RolloverPolicy};
pub use error::{MotionError, MotionResult};
pub use event::{ActiveEvent, DelayReason};
pub use hazard::HazardGenerator;
pub use state::{DeliveryStop, DeliveryWaypoint, SimPhase, VehicleSimState};
