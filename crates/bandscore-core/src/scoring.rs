//! Deterministic scoring of writing submissions and answer sheets.
//!
//! Everything in here is pure: no I/O, no clock, no randomness. Evaluator
//! backends call into these functions after whatever latency or remote work
//! they model.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::model::{EvaluationResult, Section, SectionScore, WritingRubric};
use crate::statistics::{band_from_fraction, clamp_band, mean, round_to_half};

/// Count whitespace-delimited words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count sentences as the non-empty segments between `.` delimiters.
pub fn count_sentences(text: &str) -> usize {
    text.split('.').filter(|s| !s.trim().is_empty()).count()
}

/// Normalize an answer for comparison: trimmed and lowercased.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Heuristic writing scorer built from a [`WritingRubric`].
///
/// The linking-word pattern is compiled once at construction.
#[derive(Debug, Clone)]
pub struct WritingScorer {
    rubric: WritingRubric,
    linking: Option<Regex>,
}

impl WritingScorer {
    /// Build a scorer, compiling the rubric's linking words into one
    /// case-insensitive pattern.
    pub fn new(rubric: WritingRubric) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = rubric
            .linking_words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .map(|w| regex::escape(w).replace(' ', r"\s+"))
            .collect();

        let linking = if alternatives.is_empty() {
            None
        } else {
            Some(
                RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
                    .case_insensitive(true)
                    .build()?,
            )
        };

        Ok(Self { rubric, linking })
    }

    /// Whether `text` contains at least one linking word. Always `true`
    /// when the rubric lists none.
    pub fn has_linking_word(&self, text: &str) -> bool {
        self.linking.as_ref().map_or(true, |re| re.is_match(text))
    }

    /// Score a writing submission against a minimum word count.
    pub fn score(&self, text: &str, min_words: usize) -> EvaluationResult {
        let rubric = &self.rubric;
        let word_count = count_words(text);
        let min = min_words as f64;
        let words = word_count as f64;

        let mut score = rubric.base_score;
        let mut suggestions = Vec::new();

        if word_count < min_words {
            let shortfall = (min - words) / min;
            score -= shortfall * rubric.shortfall_weight;
        }

        if min_words > 0 && words > rubric.length_bonus_ratio * min {
            score += rubric.length_bonus;
        }

        if count_sentences(text) < rubric.min_sentences {
            score -= rubric.sentence_penalty;
            suggestions.push(format!(
                "Develop your ideas across more sentences; aim for at least {}.",
                rubric.min_sentences
            ));
        }

        if !self.has_linking_word(text) {
            score -= rubric.linking_penalty;
            suggestions.push(
                "Use linking words such as 'however' or 'moreover' to connect your ideas."
                    .to_string(),
            );
        }

        if words < rubric.severe_shortfall_ratio * min {
            suggestions.push(format!(
                "Your response is well under the required length. Write at least {min_words} words to avoid a significant penalty."
            ));
        }

        let score = clamp_band(round_to_half(score));

        EvaluationResult {
            score,
            feedback: writing_feedback(score, word_count, min_words),
            suggestions,
            improved_version: None,
            word_count,
        }
    }
}

fn writing_feedback(score: f64, word_count: usize, min_words: usize) -> String {
    let tier = if score >= 7.0 {
        "Well organised response with a clear position and good range of vocabulary."
    } else if score >= 5.0 {
        "Your response addresses the task, but organisation and cohesion could be stronger."
    } else {
        "Your response does not yet fully address the task. Focus on structure and length."
    };
    if word_count < min_words {
        format!("{tier} You wrote {word_count} words; the task requires at least {min_words}.")
    } else {
        format!("{tier} You wrote {word_count} words.")
    }
}

/// Score an answer sheet against an answer key.
///
/// Only question ids present in the key are counted. Comparison is exact
/// after trimming and lowercasing. Answers to ids missing from the key are
/// ignored, and key entries without an answer count as wrong.
pub fn score_answers(
    section: Section,
    answers: &HashMap<String, String>,
    key: &HashMap<String, String>,
) -> SectionScore {
    let total = key.len() as u32;
    let correct = key
        .iter()
        .filter(|(id, expected)| {
            answers
                .get(id.as_str())
                .is_some_and(|given| normalize_answer(given) == normalize_answer(expected))
        })
        .count() as u32;

    let score = band_from_fraction(correct, total);

    SectionScore {
        section,
        score,
        correct,
        total,
        feedback: answer_feedback(section, score),
    }
}

fn answer_feedback(section: Section, score: f64) -> String {
    let skill = match section {
        Section::Listening => "listening",
        _ => "reading",
    };
    if score >= 7.0 {
        format!("Excellent {skill} comprehension. You identified details and main ideas accurately.")
    } else if score >= 5.0 {
        format!("Good {skill} skills. Review the questions you missed to spot recurring traps.")
    } else {
        format!("Keep practising your {skill}. Focus on keywords and paraphrased answers.")
    }
}

/// Placeholder speaking band from a uniform sample in `[0, 1)`.
///
/// This is NOT an assessment of speech. It maps a random draw onto bands
/// 5 to 9 and exists only until a real speaking backend is wired in.
pub fn placeholder_speaking_band(sample: f64) -> f64 {
    clamp_band(round_to_half(5.0 + sample.clamp(0.0, 1.0) * 4.0))
}

/// Feedback text for a speaking band.
pub fn speaking_feedback(score: f64) -> String {
    if score >= 7.0 {
        "Fluent and coherent delivery with a good range of vocabulary.".to_string()
    } else if score >= 5.0 {
        "Generally understandable. Work on fluency and extending your answers.".to_string()
    } else {
        "Practise speaking at length on familiar topics to build fluency.".to_string()
    }
}

/// Overall band: the mean of the given section bands, rounded to the
/// nearest half point. Returns 0 for an empty slice.
pub fn overall_band(scores: &[f64]) -> f64 {
    mean(scores.iter().copied())
        .map(|m| clamp_band(round_to_half(m)))
        .unwrap_or(0.0)
}
