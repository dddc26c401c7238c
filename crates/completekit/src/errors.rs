//! # Error types
//!
//! ## Overview
//!
//! This module contains the error types returned at the session and boundary
//! seams. No error here is fatal to a host: completion failures degrade to
//! "no suggestions shown", and persistence failures are logged and dropped.

/// Errors returned from session and boundary operations.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EditorError {
    /// Failure during Input/Output at the persistence boundary.
    #[error("Input/Output Error: {0}")]
    IOError(#[from] std::io::Error),

    /// Failure in host surface code.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Generic failure.
    #[error("Error: {0}")]
    Failure(String),
}

/// Common result type for session operations.
pub type SessionResult<V> = Result<V, EditorError>;
