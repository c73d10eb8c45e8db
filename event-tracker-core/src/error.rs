//! Error types for the event tracker core.

use thiserror::Error;

use crate::event::EventId;

/// Errors returned by store and filter operations.
///
/// Every variant is local and recoverable; an operation that fails leaves
/// the store exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("Invalid filter mode '{0}'. Expected one of: all, past, upcoming, today, month")]
    InvalidFilter(String),
}

/// Result type alias for event tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
