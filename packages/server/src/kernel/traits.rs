// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The moderation pipeline's retry/fail-open policy lives in kernel::moderation;
// this trait is just the seam to the external judge so tests can script it.

use async_trait::async_trait;
use judge_client::{ContentKind, JudgeClient, JudgeRequest, JudgeVerdict, Result};

// =============================================================================
// Judge Trait (Infrastructure - one verdict per call)
// =============================================================================

#[async_trait]
pub trait BaseJudge: Send + Sync {
    /// Ask the content-safety judge for a verdict on one piece of text.
    ///
    /// One attempt, no retrying - the caller owns retry policy.
    async fn judge(&self, content: &str, kind: ContentKind) -> Result<JudgeVerdict>;
}

#[async_trait]
impl BaseJudge for JudgeClient {
    async fn judge(&self, content: &str, kind: ContentKind) -> Result<JudgeVerdict> {
        JudgeClient::judge(self, JudgeRequest::new(content, kind)).await
    }
}
