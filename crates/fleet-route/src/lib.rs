//! `fleet-route`: distance matrices and stop ordering for one vehicle.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`matrix`]  | `DistanceMatrix` (row-major, implicit zero diagonal)           |
//! | [`solver`]  | `RouteSolver` trait, `NearestNeighborTwoOpt`, `RouteOrder`     |
//! | [`error`]   | `RouteError`, `RouteResult<T>`                                 |
//!
//! # Tour model
//!
//! Tours are **open**: the vehicle starts at the caller's start index, visits
//! every other stop once and does not return.  The edge after the last stop
//! therefore costs nothing, both in 2-opt move evaluation and in the reported
//! total.
//!
//! The solver is a construction + local-search heuristic sized for delivery
//! batches of tens of stops; it is not intended for large instances.

pub mod error;
pub mod matrix;
pub mod solver;


pub use error::{RouteError, RouteResult};
pub use matrix::DistanceMatrix;
pub use solver::{
    NearestNeighborTwoOpt, RouteOrder, RouteSolver, SolverConfig, nearest_neighbor, solve_route,
    tour_cost, two_opt,
};
