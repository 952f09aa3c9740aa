//! Local heuristic evaluator with simulated latency.
//!
//! Stands in for a remote scoring service: every call sleeps for a fixed,
//! configurable delay before answering, so callers exercise the same await
//! points they will need once a real backend is plugged in.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

use bandscore_core::model::{
    EvaluationResult, Section, SectionScore, SpeakingSubmission, WritingRubric, WritingSubmission,
};
use bandscore_core::scoring::{placeholder_speaking_band, speaking_feedback, WritingScorer};
use bandscore_core::traits::Evaluator;

pub const DEFAULT_WRITING_LATENCY: Duration = Duration::from_millis(1500);
pub const DEFAULT_SPEAKING_LATENCY: Duration = Duration::from_millis(2000);

/// Evaluator that scores writing with the rubric heuristics.
///
/// Speaking is a PLACEHOLDER: the band is drawn at random between 5 and 9
/// and says nothing about the recording.
pub struct HeuristicEvaluator {
    scorer: WritingScorer,
    writing_latency: Duration,
    speaking_latency: Duration,
    rng: Mutex<StdRng>,
}

impl HeuristicEvaluator {
    pub fn new(rubric: WritingRubric) -> anyhow::Result<Self> {
        let scorer = WritingScorer::new(rubric).context("invalid linking words in rubric")?;
        Ok(Self {
            scorer,
            writing_latency: DEFAULT_WRITING_LATENCY,
            speaking_latency: DEFAULT_SPEAKING_LATENCY,
            rng: Mutex::new(StdRng::from_os_rng()),
        })
    }

    /// Override the simulated latencies.
    pub fn with_latency(mut self, writing: Duration, speaking: Duration) -> Self {
        self.writing_latency = writing;
        self.speaking_latency = speaking;
        self
    }

    /// Seed the placeholder speaking draw, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    fn draw(&self) -> anyhow::Result<f64> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| anyhow::anyhow!("speaking rng lock poisoned"))?;
        Ok(rng.random::<f64>())
    }
}

#[async_trait]
impl Evaluator for HeuristicEvaluator {
    fn name(&self) -> &str {
        "heuristic"
    }

    #[instrument(skip_all, fields(min_words = submission.min_words))]
    async fn evaluate_writing(
        &self,
        submission: &WritingSubmission,
    ) -> anyhow::Result<EvaluationResult> {
        tokio::time::sleep(self.writing_latency).await;
        Ok(self.scorer.score(&submission.text, submission.min_words))
    }

    #[instrument(skip_all, fields(duration_secs = submission.duration_secs))]
    async fn evaluate_speaking(
        &self,
        submission: &SpeakingSubmission,
    ) -> anyhow::Result<SectionScore> {
        tokio::time::sleep(self.speaking_latency).await;
        let score = placeholder_speaking_band(self.draw()?);
        tracing::debug!(score, "placeholder speaking band drawn");
        Ok(SectionScore {
            section: Section::Speaking,
            score,
            correct: 0,
            total: 0,
            feedback: speaking_feedback(score),
        })
    }
}
