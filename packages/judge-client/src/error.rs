//! Error types for the judge client.

use thiserror::Error;

/// Result type for judge client operations.
pub type Result<T> = std::result::Result<T, JudgeError>;

/// Judge client errors.
///
/// The moderation pipeline decides retry behavior from [`JudgeError::is_retryable`]:
/// transport hiccups, rate limits, and service-side failures are worth another
/// attempt; everything else is not.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The judge service asked us to slow down (HTTP 429)
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The judge service failed on its side (HTTP 5xx)
    #[error("judge service error: {0}")]
    Server(String),

    /// Request was rejected by the API (other non-2xx response)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected verdict shape)
    #[error("parse error: {0}")]
    Parse(String),
}

impl JudgeError {
    /// Whether another attempt at the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            JudgeError::Network(_) | JudgeError::RateLimited(_) | JudgeError::Server(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classes_are_retryable() {
        assert!(JudgeError::Network("timeout".into()).is_retryable());
        assert!(JudgeError::RateLimited("429".into()).is_retryable());
        assert!(JudgeError::Server("500".into()).is_retryable());
    }

    #[test]
    fn terminal_classes_are_not_retryable() {
        assert!(!JudgeError::Config("no key".into()).is_retryable());
        assert!(!JudgeError::Api("bad request".into()).is_retryable());
        assert!(!JudgeError::Parse("garbage".into()).is_retryable());
    }
}
