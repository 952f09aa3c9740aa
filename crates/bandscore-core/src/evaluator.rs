//! Score evaluator facade.
//!
//! The application calls [`ScoreEvaluator`] for every practice section.
//! Reading and listening are marked locally against an answer key; writing
//! and speaking go through an injected [`Evaluator`] backend.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::model::{
    EvaluationResult, Section, SectionScore, SpeakingSubmission, WritingSubmission,
};
use crate::scoring::{overall_band, score_answers};
use crate::statistics::{clamp_band, round_to_half};
use crate::traits::Evaluator;

/// Turns raw submissions into band scores and feedback.
#[derive(Clone)]
pub struct ScoreEvaluator {
    backend: Arc<dyn Evaluator>,
}

impl ScoreEvaluator {
    pub fn new(backend: Arc<dyn Evaluator>) -> Self {
        Self { backend }
    }

    /// Name of the backend handling writing and speaking.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Evaluate a writing submission against a minimum word count.
    pub async fn evaluate_writing(
        &self,
        prompt: &str,
        text: &str,
        min_words: usize,
    ) -> Result<EvaluationResult> {
        let submission = WritingSubmission {
            prompt: prompt.to_string(),
            text: text.to_string(),
            min_words,
        };

        let mut result = self
            .backend
            .evaluate_writing(&submission)
            .await
            .with_context(|| format!("{} failed to evaluate writing", self.backend.name()))?;
        result.score = clamp_band(round_to_half(result.score));

        tracing::debug!(
            backend = self.backend.name(),
            words = result.word_count,
            score = result.score,
            "writing evaluated"
        );
        Ok(result)
    }

    /// Mark a reading answer sheet.
    pub fn evaluate_reading(
        &self,
        answers: &HashMap<String, String>,
        correct_answers: &HashMap<String, String>,
    ) -> SectionScore {
        let result = score_answers(Section::Reading, answers, correct_answers);
        tracing::debug!(
            correct = result.correct,
            total = result.total,
            score = result.score,
            "reading evaluated"
        );
        result
    }

    /// Mark a listening answer sheet.
    pub fn evaluate_listening(
        &self,
        answers: &HashMap<String, String>,
        correct_answers: &HashMap<String, String>,
    ) -> SectionScore {
        let result = score_answers(Section::Listening, answers, correct_answers);
        tracing::debug!(
            correct = result.correct,
            total = result.total,
            score = result.score,
            "listening evaluated"
        );
        result
    }

    /// Evaluate a speaking submission.
    pub async fn evaluate_speaking(&self, submission: &SpeakingSubmission) -> Result<SectionScore> {
        let mut result = self
            .backend
            .evaluate_speaking(submission)
            .await
            .with_context(|| format!("{} failed to evaluate speaking", self.backend.name()))?;
        result.section = Section::Speaking;
        result.score = clamp_band(round_to_half(result.score));

        tracing::debug!(
            backend = self.backend.name(),
            score = result.score,
            "speaking evaluated"
        );
        Ok(result)
    }

    /// Overall band across the given section bands.
    pub fn calculate_overall_score(&self, scores: &[f64]) -> f64 {
        overall_band(scores)
    }
}
