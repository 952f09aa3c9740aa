//! Configuration loading and backend factories.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use bandscore_core::model::WritingRubric;
use bandscore_core::progress::DEFAULT_PROGRESS_KEY;
use bandscore_core::traits::{Evaluator, KeyValueStore};

use crate::file::JsonFileStore;
use crate::heuristic::{HeuristicEvaluator, DEFAULT_SPEAKING_LATENCY, DEFAULT_WRITING_LATENCY};
use crate::memory::MemoryStore;
use crate::mock::MockEvaluator;

/// Environment variable that forces a file store at the given path.
pub const STORE_PATH_ENV: &str = "BANDSCORE_STORE_PATH";

/// Which key-value store backs the progress log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Memory,
    #[default]
    File,
}

/// The `[store]` table. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(rename = "type", default)]
    pub kind: StoreKind,
    /// JSON file for the file store; ignored by the memory store.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Key the progress log is stored under.
    #[serde(default = "default_store_key")]
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            path: default_store_path(),
            key: default_store_key(),
        }
    }
}

/// Which backend evaluates writing and speaking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluatorKind {
    #[default]
    Heuristic,
    Mock,
}

/// The `[evaluator]` table. Every field is optional; fields that do not
/// apply to the selected backend are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    #[serde(rename = "type", default)]
    pub kind: EvaluatorKind,
    #[serde(default = "default_writing_latency_ms")]
    pub writing_latency_ms: u64,
    #[serde(default = "default_speaking_latency_ms")]
    pub speaking_latency_ms: u64,
    /// Seed for the placeholder speaking draw.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Fixed writing band for the mock backend.
    #[serde(default = "default_mock_band")]
    pub writing_band: f64,
    /// Fixed speaking band for the mock backend.
    #[serde(default = "default_mock_band")]
    pub speaking_band: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            kind: EvaluatorKind::default(),
            writing_latency_ms: default_writing_latency_ms(),
            speaking_latency_ms: default_speaking_latency_ms(),
            seed: None,
            writing_band: default_mock_band(),
            speaking_band: default_mock_band(),
        }
    }
}

fn default_store_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("bandscore")
            .join("progress.json"),
        Err(_) => PathBuf::from("bandscore-progress.json"),
    }
}
fn default_store_key() -> String {
    DEFAULT_PROGRESS_KEY.to_string()
}
fn default_writing_latency_ms() -> u64 {
    DEFAULT_WRITING_LATENCY.as_millis() as u64
}
fn default_speaking_latency_ms() -> u64 {
    DEFAULT_SPEAKING_LATENCY.as_millis() as u64
}
fn default_mock_band() -> f64 {
    6.5
}

/// Top-level bandscore configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandscoreConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    /// Writing rubric overrides.
    #[serde(default)]
    pub writing: WritingRubric,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Unset variables resolve to the empty string. Substituted values are not
/// scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `bandscore.toml` in the current directory
/// 2. `~/.config/bandscore/config.toml`
///
/// Environment variable override: `BANDSCORE_STORE_PATH`.
pub fn load_config() -> Result<BandscoreConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<BandscoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("bandscore.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => BandscoreConfig::default(),
    };

    if let Ok(path) = std::env::var(STORE_PATH_ENV) {
        if !path.is_empty() {
            config.store.kind = StoreKind::File;
            config.store.path = PathBuf::from(path);
        }
    }

    config.store.path = resolve_path(&config.store.path);
    config.store.key = resolve_env_vars(&config.store.key);

    Ok(config)
}

/// Parse a TOML configuration document.
pub fn parse_config(content: &str) -> Result<BandscoreConfig> {
    Ok(toml::from_str::<BandscoreConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bandscore"))
}

/// Create the writing/speaking backend described by `config`.
pub fn create_evaluator(config: &BandscoreConfig) -> Result<Arc<dyn Evaluator>> {
    let settings = &config.evaluator;
    match settings.kind {
        EvaluatorKind::Heuristic => {
            let mut evaluator = HeuristicEvaluator::new(config.writing.clone())?.with_latency(
                Duration::from_millis(settings.writing_latency_ms),
                Duration::from_millis(settings.speaking_latency_ms),
            );
            if let Some(seed) = settings.seed {
                evaluator = evaluator.with_seed(seed);
            }
            Ok(Arc::new(evaluator))
        }
        EvaluatorKind::Mock => Ok(Arc::new(MockEvaluator::new(
            settings.writing_band,
            settings.speaking_band,
        ))),
    }
}

/// Create the key-value store described by `config`.
pub fn create_store(config: &BandscoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.store.kind {
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreKind::File => {
            if config.store.path.as_os_str().is_empty() {
                anyhow::bail!("file store path is empty");
            }
            Ok(Arc::new(JsonFileStore::new(&config.store.path)))
        }
    }
}

/// Starter configuration written by `bandscore init`.
pub const STARTER_CONFIG: &str = r#"# bandscore configuration
# Every table and field is optional; omitted values use the defaults shown.

[store]
type = "file"            # or "memory"
path = "${HOME}/.local/share/bandscore/progress.json"
key = "user_progress"

[evaluator]
type = "heuristic"       # or "mock"
writing_latency_ms = 1500
speaking_latency_ms = 2000

[writing]
base_score = 6.5
min_sentences = 5
"#;
