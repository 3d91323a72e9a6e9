//! Error types for account projections

use thiserror::Error;

/// Result type alias for projection operations
pub type Result<T> = std::result::Result<T, ProjectionError>;

/// Errors raised by the projection library
#[derive(Error, Debug)]
pub enum ProjectionError {
    /// Simulation horizon must be between 1 and `MAX_YEARS` years
    #[error("Invalid horizon: expected 1 to {max} years, got {years}", max = crate::projection::MAX_YEARS)]
    InvalidHorizon { years: u32 },

    /// Column name not present in the ledger lookup table
    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectionError {
    /// Create an unknown column error
    pub fn unknown_column(name: impl Into<String>) -> Self {
        Self::UnknownColumn { name: name.into() }
    }
}
