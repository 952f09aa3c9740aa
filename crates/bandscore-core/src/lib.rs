//! bandscore-core — Band scoring, evaluator traits, and progress aggregation.
//!
//! This crate defines the data model, the pure scoring rules, the traits
//! behind which evaluator backends and key-value stores plug in, and the two
//! services the application talks to: [`ScoreEvaluator`] and
//! [`ProgressAggregator`].

pub mod error;
pub mod evaluator;
pub mod model;
pub mod progress;
pub mod scoring;
pub mod statistics;
pub mod traits;

pub use error::StoreError;
pub use evaluator::ScoreEvaluator;
pub use progress::{ProgressAggregator, DEFAULT_PROGRESS_KEY};
