//! Shared error type.
//!
//! Sub-crates define their own error enums (`RouteError`, `MotionError`, …)
//! and keep them separate; `FleetError` covers run configuration.

use thiserror::Error;

/// The top-level error type for `fleet-core`.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `fleet-core`.
pub type FleetResult<T> = Result<T, FleetError>;
