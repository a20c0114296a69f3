//! Pure REST client for the content-safety judge API.
//!
//! A minimal client with no forum logic: it sends text, gets back an
//! accept/reject verdict with a reason, and classifies failures so callers can
//! build their own retry policy on top. What the judge considers acceptable is
//! entirely the service's business.
//!
//! # Example
//!
//! ```rust,ignore
//! use judge_client::{ContentKind, JudgeClient, JudgeRequest};
//!
//! let client = JudgeClient::from_env()?;
//!
//! let verdict = client
//!     .judge(JudgeRequest::new("feeling better today", ContentKind::Post))
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{JudgeError, Result};
pub use types::{ContentKind, JudgeRequest, JudgeVerdict, VerdictKind};

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use crate::types::RawJudgment;

/// Per-request timeout. The judge is a model inference call; anything slower
/// than this is treated as a transient failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Pure judge API client.
#[derive(Clone)]
pub struct JudgeClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl JudgeClient {
    /// Create a new client with the given API key and service base URL.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Create from the `JUDGE_API_KEY` and `JUDGE_API_URL` environment variables.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("JUDGE_API_KEY")
            .map_err(|_| JudgeError::Config("JUDGE_API_KEY not set".into()))?;
        let base_url = std::env::var("JUDGE_API_URL")
            .map_err(|_| JudgeError::Config("JUDGE_API_URL not set".into()))?;
        Ok(Self::new(api_key, base_url))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one piece of text for judgment.
    ///
    /// Makes exactly one HTTP call. Failures are classified by
    /// [`JudgeError::is_retryable`]; no retrying happens here.
    pub async fn judge(&self, request: JudgeRequest) -> Result<JudgeVerdict> {
        let response = self
            .http_client
            .post(format!("{}/judgments", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "judge request failed");
                JudgeError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "judge API error");

            return Err(if status.as_u16() == 429 {
                JudgeError::RateLimited(error_text)
            } else if status.is_server_error() {
                JudgeError::Server(format!("{status}: {error_text}"))
            } else {
                JudgeError::Api(format!("{status}: {error_text}"))
            });
        }

        let raw: RawJudgment = response
            .json()
            .await
            .map_err(|e| JudgeError::Parse(e.to_string()))?;

        JudgeVerdict::try_from(raw)
    }
}
