use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("zone {name:?}: {reason}")]
    InvalidZone { name: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TrafficResult<T> = Result<T, TrafficError>;
