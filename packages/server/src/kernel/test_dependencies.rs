//! Scripted test doubles for kernel dependencies.
//!
//! `ScriptedJudge` replaces the real judge in unit and integration tests:
//! responses are queued up front and served in order, and every call is
//! counted so retry behavior can be asserted exactly.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use judge_client::{ContentKind, JudgeError, JudgeVerdict, Result, VerdictKind};

use crate::kernel::traits::BaseJudge;

/// A judge whose verdicts are scripted by the test.
///
/// With an empty script every call accepts - the common case for tests that
/// are not about moderation.
#[derive(Default)]
pub struct ScriptedJudge {
    script: Mutex<VecDeque<Result<JudgeVerdict>>>,
    calls: AtomicUsize,
}

impl ScriptedJudge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an Accept verdict with the given reason.
    pub fn push_accept(&self, reason: &str) {
        self.push(Ok(JudgeVerdict {
            verdict: VerdictKind::Accept,
            reason: reason.to_string(),
        }));
    }

    /// Queue a Reject verdict with the given reason.
    pub fn push_reject(&self, reason: &str) {
        self.push(Ok(JudgeVerdict {
            verdict: VerdictKind::Reject,
            reason: reason.to_string(),
        }));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: JudgeError) {
        self.push(Err(error));
    }

    fn push(&self, response: Result<JudgeVerdict>) {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(response);
    }

    /// How many times the judge has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BaseJudge for ScriptedJudge {
    async fn judge(&self, _content: &str, _kind: ContentKind) -> Result<JudgeVerdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Ok(JudgeVerdict {
                    verdict: VerdictKind::Accept,
                    reason: "ok".to_string(),
                })
            })
    }
}
