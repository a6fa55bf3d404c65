//! Error types for input loading and simulation runs

use thiserror::Error;

/// Errors raised while loading inputs or running a simulation
///
/// The projection math itself is total: negative balances and contributions
/// are valid states. The only engine-side failure is a loan with no term.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("Invalid loan term: {months} months (a schedule needs at least one month)")]
    InvalidTerm { months: u32 },

    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown city key: {0}")]
    UnknownCity(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimulatorError>;
