//! Forum actions - the submission and deletion flows.
//!
//! Each action is a plain async function over `ServerDeps`: validate, then
//! moderate, then persist, then publish. The accept -> persist -> publish
//! sequence runs inline in the submitting task, which is what gives a room
//! its acceptance-order broadcast guarantee.

pub mod delete_comment;
pub mod delete_post;
pub mod submit_comment;
pub mod submit_post;

pub use delete_comment::delete_comment;
pub use delete_post::delete_post;
pub use submit_comment::submit_comment;
pub use submit_post::submit_post;

use crate::common::ForumError;

/// Shared body validation: non-empty after trimming, bounded length in
/// characters. Runs before moderation - an oversized body never costs a
/// judge call.
pub(crate) fn validate_body(body: &str, max_chars: usize, what: &str) -> Result<(), ForumError> {
    if body.trim().is_empty() {
        return Err(ForumError::Validation(format!("{what} body is empty")));
    }
    let chars = body.chars().count();
    if chars > max_chars {
        return Err(ForumError::Validation(format!(
            "{what} body is {chars} characters, limit is {max_chars}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace_bodies() {
        assert!(validate_body("", 10, "post").is_err());
        assert!(validate_body("   \n\t", 10, "post").is_err());
    }

    #[test]
    fn enforces_bound_in_characters_not_bytes() {
        // Ten multi-byte characters are within a ten-character limit.
        let body = "んんんんんんんんんん";
        assert!(validate_body(body, 10, "comment").is_ok());
        assert!(validate_body(&format!("{body}ん"), 10, "comment").is_err());
    }

    #[test]
    fn accepts_bodies_at_the_bound() {
        let body = "a".repeat(2000);
        assert!(validate_body(&body, 2000, "post").is_ok());
        let body = "a".repeat(2001);
        assert!(matches!(
            validate_body(&body, 2000, "post"),
            Err(ForumError::Validation(_))
        ));
    }
}
