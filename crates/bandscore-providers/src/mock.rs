//! Mock evaluator for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use bandscore_core::model::{
    EvaluationResult, Section, SectionScore, SpeakingSubmission, WritingSubmission,
};
use bandscore_core::scoring::{count_words, speaking_feedback};
use bandscore_core::traits::Evaluator;

/// An evaluator that answers instantly with fixed bands.
///
/// Useful for exercising the application without latency or randomness.
pub struct MockEvaluator {
    writing_band: f64,
    speaking_band: f64,
    /// Rewrite attached to every writing result.
    improved_version: Option<String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last writing submission received.
    last_writing: Mutex<Option<WritingSubmission>>,
}

impl MockEvaluator {
    pub fn new(writing_band: f64, speaking_band: f64) -> Self {
        Self {
            writing_band,
            speaking_band,
            improved_version: None,
            call_count: AtomicU32::new(0),
            last_writing: Mutex::new(None),
        }
    }

    /// Attach a fixed rewrite to every writing result.
    pub fn with_improved_version(mut self, text: &str) -> Self {
        self.improved_version = Some(text.to_string());
        self
    }

    /// Get the number of calls made to this evaluator.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last writing submission made to this evaluator.
    pub fn last_writing(&self) -> Option<WritingSubmission> {
        self.last_writing.lock().ok().and_then(|last| last.clone())
    }
}

impl Default for MockEvaluator {
    fn default() -> Self {
        Self::new(6.5, 6.5)
    }
}

#[async_trait]
impl Evaluator for MockEvaluator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn evaluate_writing(
        &self,
        submission: &WritingSubmission,
    ) -> anyhow::Result<EvaluationResult> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_writing.lock() {
            *last = Some(submission.clone());
        }

        Ok(EvaluationResult {
            score: self.writing_band,
            feedback: format!("Mock writing band {}", self.writing_band),
            suggestions: vec![],
            improved_version: self.improved_version.clone(),
            word_count: count_words(&submission.text),
        })
    }

    async fn evaluate_speaking(
        &self,
        _submission: &SpeakingSubmission,
    ) -> anyhow::Result<SectionScore> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(SectionScore {
            section: Section::Speaking,
            score: self.speaking_band,
            correct: 0,
            total: 0,
            feedback: speaking_feedback(self.speaking_band),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_bands() {
        let evaluator = MockEvaluator::new(7.0, 5.5).with_improved_version("Better text.");
        let submission = WritingSubmission {
            prompt: "Describe a chart".into(),
            text: "The chart shows growth".into(),
            min_words: 150,
        };

        let writing = evaluator.evaluate_writing(&submission).await.unwrap();
        assert_eq!(writing.score, 7.0);
        assert_eq!(writing.word_count, 4);
        assert_eq!(writing.improved_version.as_deref(), Some("Better text."));

        let speaking = evaluator
            .evaluate_speaking(&SpeakingSubmission::default())
            .await
            .unwrap();
        assert_eq!(speaking.score, 5.5);
        assert_eq!(evaluator.call_count(), 2);
        assert_eq!(
            evaluator.last_writing().map(|s| s.prompt),
            Some("Describe a chart".to_string())
        );
    }
}
