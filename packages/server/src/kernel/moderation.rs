//! Moderation pipeline - bounded retry, then fail open.
//!
//! Wraps the external judge with the forum's availability policy: transient
//! judge failures are retried with exponential backoff, and once retries are
//! exhausted (or the failure is terminal) the pipeline returns Accept with an
//! explanatory reason instead of an error.
//!
//! Failing open is a product decision, not a bug: the forum stays usable while
//! the judge is degraded, and operators find out from the logs. Callers can
//! rely on `moderate` never failing.

use std::sync::Arc;
use std::time::Duration;

use judge_client::{ContentKind, VerdictKind};
use tracing::{info, warn};

use crate::kernel::traits::BaseJudge;

/// Default attempt bound (first try + retries).
const MAX_ATTEMPTS: u32 = 4;

/// Base backoff delay; doubles after each failed attempt.
const BASE_DELAY: Duration = Duration::from_millis(200);

/// The pipeline's accept/reject decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

/// Verdict plus a human-readable reason.
///
/// Transient by design - never persisted anywhere.
#[derive(Debug, Clone)]
pub struct ModerationOutcome {
    pub verdict: Verdict,
    pub reason: String,
}

impl ModerationOutcome {
    pub fn is_accept(&self) -> bool {
        self.verdict == Verdict::Accept
    }
}

/// Retry knobs, injectable so tests run without real sleeps.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: BASE_DELAY,
        }
    }
}

/// The moderation pipeline. Cheap to clone via the shared judge handle.
#[derive(Clone)]
pub struct ModerationPipeline {
    judge: Arc<dyn BaseJudge>,
    policy: RetryPolicy,
}

impl ModerationPipeline {
    pub fn new(judge: Arc<dyn BaseJudge>) -> Self {
        Self::with_policy(judge, RetryPolicy::default())
    }

    pub fn with_policy(judge: Arc<dyn BaseJudge>, policy: RetryPolicy) -> Self {
        Self { judge, policy }
    }

    /// Judge one piece of text. Infallible: every failure path degrades to
    /// Accept with a reason naming the degraded path.
    pub async fn moderate(&self, content: &str, kind: ContentKind) -> ModerationOutcome {
        let mut attempt: u32 = 1;

        loop {
            match self.judge.judge(content, kind).await {
                Ok(judgment) => {
                    let verdict = match judgment.verdict {
                        VerdictKind::Accept => Verdict::Accept,
                        VerdictKind::Reject => Verdict::Reject,
                    };
                    info!(kind = %kind, attempt, verdict = ?verdict, "moderation verdict");
                    return ModerationOutcome {
                        verdict,
                        reason: judgment.reason,
                    };
                }

                Err(e) if e.is_retryable() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.base_delay * 2u32.pow(attempt - 1);
                    warn!(
                        error = %e,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "judge call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }

                Err(e) if e.is_retryable() => {
                    warn!(
                        error = %e,
                        attempts = attempt,
                        "judge unavailable after all retries, failing open"
                    );
                    return Self::fail_open(format!(
                        "content judge unavailable after {attempt} attempts"
                    ));
                }

                Err(e) => {
                    warn!(error = %e, attempt, "judge call failed terminally, failing open");
                    return Self::fail_open("content judge returned an unusable response");
                }
            }
        }
    }

    fn fail_open(cause: impl Into<String>) -> ModerationOutcome {
        ModerationOutcome {
            verdict: Verdict::Accept,
            reason: format!("accepted without review: {}", cause.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::ScriptedJudge;
    use judge_client::JudgeError;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
        }
    }

    fn pipeline(judge: Arc<ScriptedJudge>, max_attempts: u32) -> ModerationPipeline {
        ModerationPipeline::with_policy(judge, fast_policy(max_attempts))
    }

    #[tokio::test]
    async fn passes_through_accept_and_reject() {
        let judge = Arc::new(ScriptedJudge::new());
        judge.push_accept("supportive");
        judge.push_reject("spam");
        let pipeline = pipeline(judge.clone(), 4);

        let first = pipeline.moderate("hello", ContentKind::Post).await;
        assert_eq!(first.verdict, Verdict::Accept);
        assert_eq!(first.reason, "supportive");

        let second = pipeline.moderate("buy now", ContentKind::Post).await;
        assert_eq!(second.verdict, Verdict::Reject);
        assert_eq!(second.reason, "spam");
    }

    #[tokio::test]
    async fn retries_configured_number_of_times_then_fails_open() {
        let judge = Arc::new(ScriptedJudge::new());
        for _ in 0..4 {
            judge.push_error(JudgeError::Server("500".into()));
        }
        let pipeline = pipeline(judge.clone(), 4);

        let outcome = pipeline.moderate("text", ContentKind::Comment).await;

        // Exactly max_attempts calls: the initial try plus 3 retries.
        assert_eq!(judge.call_count(), 4);
        assert_eq!(outcome.verdict, Verdict::Accept);
        assert!(outcome.reason.contains("unavailable"));
    }

    #[tokio::test]
    async fn recovers_when_a_retry_succeeds() {
        let judge = Arc::new(ScriptedJudge::new());
        judge.push_error(JudgeError::RateLimited("429".into()));
        judge.push_reject("abusive");
        let pipeline = pipeline(judge.clone(), 4);

        let outcome = pipeline.moderate("text", ContentKind::Post).await;

        assert_eq!(judge.call_count(), 2);
        assert_eq!(outcome.verdict, Verdict::Reject);
        assert_eq!(outcome.reason, "abusive");
    }

    #[tokio::test]
    async fn non_retryable_failure_fails_open_without_retrying() {
        let judge = Arc::new(ScriptedJudge::new());
        judge.push_error(JudgeError::Api("401 unauthorized".into()));
        let pipeline = pipeline(judge.clone(), 4);

        let outcome = pipeline.moderate("text", ContentKind::Post).await;

        assert_eq!(judge.call_count(), 1);
        assert_eq!(outcome.verdict, Verdict::Accept);
        assert!(outcome.reason.contains("unusable"));
    }

    #[tokio::test]
    async fn unparseable_verdict_fails_open_without_retrying() {
        let judge = Arc::new(ScriptedJudge::new());
        judge.push_error(JudgeError::Parse("unrecognized verdict value".into()));
        let pipeline = pipeline(judge.clone(), 4);

        let outcome = pipeline.moderate("text", ContentKind::Comment).await;

        assert_eq!(judge.call_count(), 1);
        assert_eq!(outcome.verdict, Verdict::Accept);
    }
}
