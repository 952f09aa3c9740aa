//! bandscore-providers — evaluator backends, stores, and configuration.
//!
//! Implements the `Evaluator` and `KeyValueStore` traits from
//! `bandscore-core` and builds them from a TOML configuration file.

pub mod config;
pub mod file;
pub mod heuristic;
pub mod memory;
pub mod mock;

pub use config::{
    create_evaluator, create_store, load_config, load_config_from, BandscoreConfig,
    EvaluatorConfig, EvaluatorKind, StoreConfig, StoreKind,
};
pub use file::JsonFileStore;
pub use heuristic::HeuristicEvaluator;
pub use memory::MemoryStore;
pub use mock::MockEvaluator;
