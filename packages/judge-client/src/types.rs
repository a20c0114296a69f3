//! Judge API request and response types.

use serde::{Deserialize, Serialize};

use crate::error::JudgeError;

// =============================================================================
// Request
// =============================================================================

/// What kind of content is being judged.
///
/// The judge applies different length and tone expectations to top-level posts
/// versus replies, so the kind is part of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Post,
    Comment,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Post => write!(f, "post"),
            ContentKind::Comment => write!(f, "comment"),
        }
    }
}

/// A single judgment request.
#[derive(Debug, Clone, Serialize)]
pub struct JudgeRequest {
    /// The text to judge.
    pub content: String,

    /// What the text is (post or comment).
    pub content_kind: ContentKind,
}

impl JudgeRequest {
    pub fn new(content: impl Into<String>, content_kind: ContentKind) -> Self {
        Self {
            content: content.into(),
            content_kind,
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// Accept/reject decision from the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    Accept,
    Reject,
}

/// A parsed, well-formed verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgeVerdict {
    pub verdict: VerdictKind,
    pub reason: String,
}

/// The loosely-shaped wire response.
///
/// The judge is a language model behind an API; its output is only promised to
/// be "roughly" `{verdict, reason}`. We parse strictly into [`JudgeVerdict`]
/// and surface anything else as a parse error so callers can decide what a
/// malformed verdict means for them.
#[derive(Debug, Deserialize)]
pub(crate) struct RawJudgment {
    verdict: Option<String>,
    reason: Option<String>,
}

impl TryFrom<RawJudgment> for JudgeVerdict {
    type Error = JudgeError;

    fn try_from(raw: RawJudgment) -> Result<Self, Self::Error> {
        let verdict = raw
            .verdict
            .ok_or_else(|| JudgeError::Parse("response missing verdict field".into()))?;

        let kind = match verdict.trim().to_ascii_lowercase().as_str() {
            "accept" | "accepted" => VerdictKind::Accept,
            "reject" | "rejected" => VerdictKind::Reject,
            other => {
                return Err(JudgeError::Parse(format!(
                    "unrecognized verdict value: {other:?}"
                )))
            }
        };

        Ok(JudgeVerdict {
            verdict: kind,
            reason: raw.reason.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<JudgeVerdict, JudgeError> {
        let raw: RawJudgment = serde_json::from_str(json)
            .map_err(|e| JudgeError::Parse(e.to_string()))?;
        JudgeVerdict::try_from(raw)
    }

    #[test]
    fn parses_well_formed_verdicts() {
        let v = parse(r#"{"verdict": "accept", "reason": "supportive"}"#).unwrap();
        assert_eq!(v.verdict, VerdictKind::Accept);
        assert_eq!(v.reason, "supportive");

        let v = parse(r#"{"verdict": "reject", "reason": "spam"}"#).unwrap();
        assert_eq!(v.verdict, VerdictKind::Reject);
    }

    #[test]
    fn tolerates_case_and_tense_variants() {
        let v = parse(r#"{"verdict": "Accepted", "reason": ""}"#).unwrap();
        assert_eq!(v.verdict, VerdictKind::Accept);

        let v = parse(r#"{"verdict": " REJECT ", "reason": "x"}"#).unwrap();
        assert_eq!(v.verdict, VerdictKind::Reject);
    }

    #[test]
    fn missing_reason_defaults_to_empty() {
        let v = parse(r#"{"verdict": "accept"}"#).unwrap();
        assert_eq!(v.reason, "");
    }

    #[test]
    fn garbage_verdicts_are_parse_errors() {
        assert!(matches!(
            parse(r#"{"verdict": "maybe", "reason": "?"}"#),
            Err(JudgeError::Parse(_))
        ));
        assert!(matches!(
            parse(r#"{"reason": "no verdict here"}"#),
            Err(JudgeError::Parse(_))
        ));
        assert!(matches!(parse("[1, 2, 3]"), Err(JudgeError::Parse(_))));
    }
}
