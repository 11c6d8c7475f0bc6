//! Route-planning error type.

use thiserror::Error;

/// Construction errors raised before any ordering is attempted.  All are
/// fatal for the planning request.
#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("distance matrix is empty")]
    EmptyMatrix,

    #[error("distance matrix row {row} has {got} entries, expected {expected}")]
    NotSquare { row: usize, got: usize, expected: usize },

    #[error("negative travel cost {cost} at ({from}, {to})")]
    NegativeCost { from: usize, to: usize, cost: f64 },

    #[error("start index {start} out of range for {n} stops")]
    StartOutOfRange { start: usize, n: usize },

    #[error("stop list has {stops} entries but the distance matrix has {expected}")]
    StopCountMismatch { stops: usize, expected: usize },
}

pub type RouteResult<T> = Result<T, RouteError>;
