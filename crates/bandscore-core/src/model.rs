//! Core data model types for bandscore.
//!
//! These are the types shared by the evaluator, the progress aggregator and
//! the surrounding application: skill sections, evaluation results, and the
//! persisted progress records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the four skill areas tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Listening,
    Reading,
    Writing,
    Speaking,
}

impl Section {
    /// All sections, in dashboard order.
    pub const ALL: [Section; 4] = [
        Section::Listening,
        Section::Reading,
        Section::Writing,
        Section::Speaking,
    ];
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Listening => write!(f, "listening"),
            Section::Reading => write!(f, "reading"),
            Section::Writing => write!(f, "writing"),
            Section::Speaking => write!(f, "speaking"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "listening" => Ok(Section::Listening),
            "reading" => Ok(Section::Reading),
            "writing" => Ok(Section::Writing),
            "speaking" => Ok(Section::Speaking),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// Feedback for a writing or speaking submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Band score, 0 to 9 in half points.
    pub score: f64,
    /// Summary feedback.
    pub feedback: String,
    /// Concrete things to work on.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// A rewritten version of the submission, when the backend offers one.
    #[serde(default)]
    pub improved_version: Option<String>,
    /// Whitespace-delimited word count of the submission.
    #[serde(default)]
    pub word_count: usize,
}

/// Result of scoring a reading, listening or speaking section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section: Section,
    /// Band score, 0 to 9 in half points.
    pub score: f64,
    /// Number of questions answered correctly (0 for speaking).
    pub correct: u32,
    /// Number of questions in the answer key (0 for speaking).
    pub total: u32,
    pub feedback: String,
}

/// A writing task submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritingSubmission {
    /// The task prompt the candidate answered.
    pub prompt: String,
    /// The candidate's text.
    pub text: String,
    /// Minimum word count required by the task.
    pub min_words: usize,
}

/// A speaking task submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakingSubmission {
    pub prompt: String,
    /// Transcript of the recording, if one is available.
    #[serde(default)]
    pub transcript: Option<String>,
    /// Length of the recording in seconds.
    #[serde(default)]
    pub duration_secs: u32,
}

/// One persisted observation of a user's score in one section.
///
/// Records are append-only: never mutated, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: Uuid,
    pub user_id: String,
    pub section: Section,
    /// Percentage score, 0 to 100.
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

/// Per-section averages for one user, recomputed on every read.
///
/// All values are integer-rounded percentages. A section with no records
/// reads as 0 and is left out of `overall`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgressSummary {
    pub listening: u32,
    pub reading: u32,
    pub writing: u32,
    pub speaking: u32,
    pub overall: u32,
    /// Number of records per section, in [`Section::ALL`] order.
    #[serde(default)]
    pub attempts: [usize; 4],
}

impl UserProgressSummary {
    /// Average percentage for one section.
    pub fn get(&self, section: Section) -> u32 {
        match section {
            Section::Listening => self.listening,
            Section::Reading => self.reading,
            Section::Writing => self.writing,
            Section::Speaking => self.speaking,
        }
    }

    /// Number of recorded attempts for one section.
    pub fn attempts(&self, section: Section) -> usize {
        self.attempts[section_index(section)]
    }

    pub(crate) fn set(&mut self, section: Section, value: u32, attempts: usize) {
        match section {
            Section::Listening => self.listening = value,
            Section::Reading => self.reading = value,
            Section::Writing => self.writing = value,
            Section::Speaking => self.speaking = value,
        }
        self.attempts[section_index(section)] = attempts;
    }
}

fn section_index(section: Section) -> usize {
    match section {
        Section::Listening => 0,
        Section::Reading => 1,
        Section::Writing => 2,
        Section::Speaking => 3,
    }
}

/// Constants for the heuristic writing score.
///
/// Every field can be overridden from the `[writing]` table of the
/// configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WritingRubric {
    /// Starting band before adjustments.
    pub base_score: f64,
    /// Bands removed for a submission with zero words; scaled linearly
    /// by the fraction of the minimum that is missing.
    pub shortfall_weight: f64,
    /// Bonus for comfortably exceeding the minimum.
    pub length_bonus: f64,
    /// Multiple of the minimum above which the length bonus applies.
    pub length_bonus_ratio: f64,
    /// Fewer sentences than this incurs `sentence_penalty`.
    pub min_sentences: usize,
    pub sentence_penalty: f64,
    /// Penalty when no linking word is found.
    pub linking_penalty: f64,
    /// Contrast and linking words, matched case-insensitively on word boundaries.
    pub linking_words: Vec<String>,
    /// Fraction of the minimum below which a severe-shortfall suggestion is added.
    pub severe_shortfall_ratio: f64,
}

impl Default for WritingRubric {
    fn default() -> Self {
        Self {
            base_score: 6.5,
            shortfall_weight: 2.0,
            length_bonus: 0.5,
            length_bonus_ratio: 1.5,
            min_sentences: 5,
            sentence_penalty: 0.5,
            linking_penalty: 0.5,
            linking_words: [
                "however",
                "moreover",
                "furthermore",
                "therefore",
                "in addition",
                "nevertheless",
                "consequently",
                "on the other hand",
                "although",
                "whereas",
            ]
            .iter()
            .map(|w| w.to_string())
            .collect(),
            severe_shortfall_ratio: 0.7,
        }
    }
}
