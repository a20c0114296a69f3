//! Test harness: in-memory database, scripted judge, spawned server.
//!
//! Every test gets its own database and its own app instance on an ephemeral
//! port, so tests run in parallel without sharing state. The judge is a
//! `ScriptedJudge` - with an empty script it accepts everything, and tests
//! that care about moderation queue verdicts and failures up front.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use forum_core::kernel::{ModerationPipeline, RetryPolicy, ScriptedJudge, ServerDeps, StreamHub};
use forum_core::server::build_app;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Open a fresh in-memory database with migrations applied.
///
/// A single pooled connection keeps the in-memory database alive for the
/// whole test and serializes access the way SQLite would anyway.
pub async fn test_pool() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("Failed to open in-memory database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

/// A running forum app plus handles into its dependencies.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    pub deps: ServerDeps,
    pub judge: Arc<ScriptedJudge>,
}

impl TestApp {
    /// Spawn the app on an ephemeral port with scripted dependencies.
    pub async fn spawn() -> Result<Self> {
        // Respect RUST_LOG when debugging tests; ignore double-init.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let pool = test_pool().await?;

        let judge = Arc::new(ScriptedJudge::new());
        let moderation = Arc::new(ModerationPipeline::with_policy(
            judge.clone(),
            RetryPolicy {
                max_attempts: 4,
                base_delay: Duration::from_millis(1),
            },
        ));
        let deps = ServerDeps::new(pool, moderation, StreamHub::new());

        let app = build_app(deps.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            deps,
            judge,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
