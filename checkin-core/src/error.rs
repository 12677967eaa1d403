//! Error types for the check-in core

use thiserror::Error;

/// Errors surfaced by check-in operations.
///
/// Every variant carries enough detail to render a user-facing message.
/// None of these are retried internally. `CapExceeded`, `AlreadyFlipped`
/// and `NoFlipsAvailable` are expected user-facing outcomes rather than
/// system faults; `Unavailable` is the storage-unreachable case and must
/// never be conflated with a limit being reached.
#[derive(Error, Debug)]
pub enum CheckinError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    CapExceeded(String),

    #[error("Tile {0} has already been flipped")]
    AlreadyFlipped(u8),

    #[error("No flips available. Write a journal entry to earn one.")]
    NoFlipsAvailable,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not allowed: {0}")]
    Unauthorized(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for check-in operations
pub type CheckinResult<T> = Result<T, CheckinError>;
