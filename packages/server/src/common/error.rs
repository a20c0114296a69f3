//! Centralized error type for forum operations.
//!
//! The taxonomy matters here: validation and authorization problems are
//! rejected at the boundary, not-found means no partial write happened, and
//! persistence failures after an accepted verdict are the one class that
//! reaches the submitter as a hard failure. Moderation unavailability is
//! deliberately absent: the pipeline absorbs it by failing open.

use thiserror::Error;

/// The primary error type for forum operations.
#[derive(Debug, Error)]
pub enum ForumError {
    /// Input failed validation (empty/oversized body, malformed field).
    /// Never reaches the moderation pipeline.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown post/comment/parent id.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Delete attempted by someone other than the author.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The store could not durably record content. When this happens after an
    /// Accept verdict it surfaces to the submitter; the record is never
    /// broadcast.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for ForumError {
    fn from(e: sqlx::Error) -> Self {
        ForumError::Persistence(e.to_string())
    }
}
