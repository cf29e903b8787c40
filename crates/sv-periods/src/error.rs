//! Error types for period reconstruction.

use thiserror::Error;

/// Result type for period reconstruction.
pub type PeriodResult<T> = Result<T, PeriodError>;

/// Both variants are recoverable: callers treat them as "no data".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// The relays disagree on how many valid samples exist.
    #[error("Relay series length mismatch after filtering: a={a}, b={b}")]
    LengthMismatch { a: usize, b: usize },

    /// Neither relay has a valid sample.
    #[error("No valid relay samples")]
    InsufficientData,
}
