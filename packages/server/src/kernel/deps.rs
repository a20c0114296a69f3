//! Server dependencies for forum actions (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! forum action. The judge sits behind the `BaseJudge` trait so tests can
//! script verdicts and failures without a network.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::kernel::moderation::ModerationPipeline;
use crate::kernel::stream_hub::StreamHub;

/// Dependencies accessible to forum actions.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: SqlitePool,
    /// Moderation pipeline in front of every submission (retry + fail-open).
    pub moderation: Arc<ModerationPipeline>,
    /// In-process pub/sub hub feeding the SSE endpoints.
    pub stream_hub: StreamHub,
}

impl ServerDeps {
    pub fn new(
        db_pool: SqlitePool,
        moderation: Arc<ModerationPipeline>,
        stream_hub: StreamHub,
    ) -> Self {
        Self {
            db_pool,
            moderation,
            stream_hub,
        }
    }
}
