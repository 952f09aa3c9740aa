//! Core trait definitions for evaluator backends and key-value stores.
//!
//! These are implemented by the `bandscore-providers` crate. The core only
//! ever sees them through trait objects so a remote scoring service or a
//! database can be substituted without touching call sites.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{EvaluationResult, SectionScore, SpeakingSubmission, WritingSubmission};

// ---------------------------------------------------------------------------
// Evaluator trait
// ---------------------------------------------------------------------------

/// Trait for backends that assess free-form submissions.
///
/// Both operations are latency-bound in a real deployment. Dropping the
/// returned future abandons the evaluation; implementations must not rely on
/// being polled to completion.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Human-readable backend name (e.g. "heuristic").
    fn name(&self) -> &str;

    /// Assess a writing submission.
    async fn evaluate_writing(
        &self,
        submission: &WritingSubmission,
    ) -> anyhow::Result<EvaluationResult>;

    /// Assess a speaking submission.
    async fn evaluate_speaking(
        &self,
        submission: &SpeakingSubmission,
    ) -> anyhow::Result<SectionScore>;
}

// ---------------------------------------------------------------------------
// Key-value store trait
// ---------------------------------------------------------------------------

/// Two-method persistence contract used by the progress aggregator.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}
