//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod moderation;
pub mod stream_hub;
pub mod test_dependencies;
pub mod traits;

// Re-export judge client types
pub use judge_client::{ContentKind, JudgeClient, JudgeVerdict, VerdictKind};

pub use deps::ServerDeps;
pub use moderation::{ModerationOutcome, ModerationPipeline, RetryPolicy, Verdict};
pub use stream_hub::StreamHub;
pub use test_dependencies::ScriptedJudge;
pub use traits::BaseJudge;
