//! Append-only progress log with on-demand averages.
//!
//! Every completed practice section appends one [`ProgressRecord`] to a
//! JSON list held under a single key of an injected [`KeyValueStore`].
//! Summaries are recomputed from the full log on every read.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::model::{ProgressRecord, Section, UserProgressSummary};
use crate::statistics::{rounded_mean, MAX_PERCENT};
use crate::traits::KeyValueStore;

/// Key the progress log is stored under unless configured otherwise.
pub const DEFAULT_PROGRESS_KEY: &str = "user_progress";

/// Records section completions and computes per-user averages.
///
/// There is no locking across writers: two aggregators sharing a store can
/// lose each other's appends. A single writer per store is assumed.
#[derive(Clone)]
pub struct ProgressAggregator {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ProgressAggregator {
    /// Create an aggregator over `store`, using [`DEFAULT_PROGRESS_KEY`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_PROGRESS_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Append a completion with a percentage `score`.
    ///
    /// Returns `false` without touching the store when the score is outside
    /// `[0, 100]` (or NaN) or when the existing log cannot be read, and
    /// `false` when the store rejects the write. A log that reads but does
    /// not parse is replaced, so one corrupt value cannot block recording.
    pub fn record_completion(&self, user_id: &str, section: Section, score: f64) -> bool {
        if !(0.0..=MAX_PERCENT).contains(&score) {
            tracing::warn!(user_id, %section, score, "rejected score outside [0, 100]");
            return false;
        }

        let mut records = match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    user_id,
                    %section,
                    io = e.is_io(),
                    "progress store unreadable, not recording: {e}"
                );
                return false;
            }
        };
        records.push(ProgressRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            section,
            score,
            timestamp: Utc::now(),
        });

        let json = match serde_json::to_string(&records) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("failed to serialize progress log: {e}");
                return false;
            }
        };

        match self.store.set(&self.key, json) {
            Ok(()) => {
                tracing::info!(user_id, %section, score, "recorded completion");
                true
            }
            Err(e) => {
                tracing::error!(user_id, %section, "failed to persist progress: {e}");
                false
            }
        }
    }

    /// Per-section averages for `user_id`.
    ///
    /// Sections without records read as 0 and are excluded from `overall`.
    pub fn get_progress(&self, user_id: &str) -> UserProgressSummary {
        let mut by_section: BTreeMap<Section, Vec<f64>> = BTreeMap::new();
        for record in self.load().into_iter().filter(|r| r.user_id == user_id) {
            by_section.entry(record.section).or_default().push(record.score);
        }

        let mut summary = UserProgressSummary::default();
        let mut section_means = Vec::new();
        for section in Section::ALL {
            let Some(scores) = by_section.get(&section) else {
                continue;
            };
            let avg = rounded_mean(scores.iter().copied());
            summary.set(section, avg, scores.len());
            section_means.push(avg as f64);
        }
        summary.overall = rounded_mean(section_means);
        summary
    }

    /// All of a user's records, oldest first.
    pub fn history(&self, user_id: &str) -> Vec<ProgressRecord> {
        let mut records: Vec<ProgressRecord> = self
            .load()
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        records.sort_by_key(|r| r.timestamp);
        records
    }

    /// The most recent record for one section, if any.
    pub fn latest(&self, user_id: &str, section: Section) -> Option<ProgressRecord> {
        self.history(user_id)
            .into_iter()
            .rev()
            .find(|r| r.section == section)
    }

    /// Read the full log. Unreadable or malformed data reads as empty.
    fn load(&self) -> Vec<ProgressRecord> {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(
                key = %self.key,
                io = e.is_io(),
                "progress store unreadable, treating as empty: {e}"
            );
            Vec::new()
        })
    }

    /// Read the full log, surfacing store failures. A stored value that is
    /// not a valid log reads as empty.
    fn try_load(&self) -> Result<Vec<ProgressRecord>, StoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(key = %self.key, "malformed progress log, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }
}
