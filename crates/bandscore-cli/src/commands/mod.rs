pub mod answers;
pub mod init;
pub mod overall;
pub mod progress;
pub mod record;
pub mod speaking;
pub mod writing;

use std::path::Path;

use anyhow::{Context, Result};

use bandscore_core::model::Section;
use bandscore_core::statistics::band_to_percent;
use bandscore_core::{ProgressAggregator, ScoreEvaluator};
use bandscore_providers::config::{create_evaluator, create_store, load_config_from};
use bandscore_providers::BandscoreConfig;

use crate::RecordArgs;

pub fn load(config_path: Option<&Path>) -> Result<BandscoreConfig> {
    let config = load_config_from(config_path)?;
    tracing::debug!(
        store = ?config.store.kind,
        store_path = %config.store.path.display(),
        evaluator = ?config.evaluator.kind,
        "config loaded"
    );
    Ok(config)
}

pub fn score_evaluator(config: &BandscoreConfig) -> Result<ScoreEvaluator> {
    let backend = create_evaluator(config).context("failed to create evaluator")?;
    Ok(ScoreEvaluator::new(backend))
}

pub fn aggregator(config: &BandscoreConfig) -> Result<ProgressAggregator> {
    let store = create_store(config).context("failed to open progress store")?;
    Ok(ProgressAggregator::with_key(store, config.store.key.clone()))
}

/// Store a band result as a percentage when `--record` was given.
pub fn record_band(
    config: &BandscoreConfig,
    args: &RecordArgs,
    section: Section,
    band: f64,
) -> Result<()> {
    if !args.record {
        return Ok(());
    }
    let Some(user) = args.user.as_deref() else {
        anyhow::bail!("--record requires --user");
    };

    let percent = band_to_percent(band);
    if !aggregator(config)?.record_completion(user, section, percent) {
        anyhow::bail!("failed to record {section} score for {user}");
    }
    println!("Recorded {section} {percent:.0}% for {user}");
    Ok(())
}
