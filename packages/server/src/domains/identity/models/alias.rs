//! Alias record - the one persisted mapping from caller token to pseudonym.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::common::ForumError;
use crate::domains::identity::generator;

/// How many aesthetic candidates to try before degrading to a
/// timestamp-suffixed alias.
const MAX_PRETTY_ATTEMPTS: u32 = 20;

/// One caller token's pseudonym. Immutable once assigned.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AliasRecord {
    pub caller_token: String,
    pub alias: String,
    pub created_at: DateTime<Utc>,
}

impl AliasRecord {
    /// Find the alias for a caller token, if one was ever assigned.
    pub async fn find_by_token(
        caller_token: &str,
        pool: &SqlitePool,
    ) -> Result<Option<Self>, ForumError> {
        let record = sqlx::query_as::<_, AliasRecord>(
            "SELECT * FROM aliases WHERE caller_token = ?1",
        )
        .bind(caller_token)
        .fetch_optional(pool)
        .await?;
        Ok(record)
    }

    /// Resolve a caller token to its alias, creating one on first contact.
    ///
    /// Idempotent: the same token always resolves to the same alias, including
    /// when two first-time resolutions race (the losing insert re-reads the
    /// winner's row). Alias collisions with other tokens are retried up to
    /// [`MAX_PRETTY_ATTEMPTS`] times, after which a timestamp suffix forces
    /// uniqueness instead of failing the caller.
    pub async fn resolve(caller_token: &str, pool: &SqlitePool) -> Result<String, ForumError> {
        if let Some(existing) = Self::find_by_token(caller_token, pool).await? {
            return Ok(existing.alias);
        }

        for _ in 0..MAX_PRETTY_ATTEMPTS {
            let candidate = generator::candidate();
            if let Some(alias) = Self::try_reserve(caller_token, &candidate, pool).await? {
                return Ok(alias);
            }
        }

        // Every aesthetic candidate collided (tiny namespace under heavy
        // load, or a test exhausting it deliberately). Timestamp suffixes
        // make further collisions practically impossible; loop in case two
        // forced candidates land on the same millisecond.
        loop {
            let candidate = generator::forced_candidate(Utc::now().timestamp_millis());
            if let Some(alias) = Self::try_reserve(caller_token, &candidate, pool).await? {
                tracing::warn!(alias = %alias, "alias namespace congested, assigned forced alias");
                return Ok(alias);
            }
        }
    }

    /// One atomic check-and-reserve attempt.
    ///
    /// `INSERT OR IGNORE` makes the uniqueness check and the reservation a
    /// single statement. Afterwards the token row either exists (our insert
    /// won, or a concurrent resolve for the same token beat us - both fine,
    /// return the stored alias) or it doesn't (the candidate alias belongs to
    /// someone else - signal the caller to try another candidate).
    async fn try_reserve(
        caller_token: &str,
        candidate: &str,
        pool: &SqlitePool,
    ) -> Result<Option<String>, ForumError> {
        sqlx::query(
            "INSERT OR IGNORE INTO aliases (caller_token, alias, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(caller_token)
        .bind(candidate)
        .bind(Utc::now())
        .execute(pool)
        .await?;

        Ok(Self::find_by_token(caller_token, pool)
            .await?
            .map(|record| record.alias))
    }
}
