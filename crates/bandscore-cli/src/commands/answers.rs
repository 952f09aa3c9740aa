//! The `bandscore reading` and `bandscore listening` commands.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use bandscore_core::model::Section;

use crate::RecordArgs;

fn load_sheet(path: &Path) -> Result<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("expected a JSON object of id to answer in {}", path.display()))
}

pub fn execute(
    section: Section,
    answers: PathBuf,
    key: PathBuf,
    record: RecordArgs,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load(config_path.as_deref())?;
    let answers = load_sheet(&answers)?;
    let key = load_sheet(&key)?;

    let evaluator = super::score_evaluator(&config)?;
    let result = match section {
        Section::Listening => evaluator.evaluate_listening(&answers, &key),
        _ => evaluator.evaluate_reading(&answers, &key),
    };

    println!("{section} band: {:.1}", result.score);
    println!("Correct: {}/{}", result.correct, result.total);
    println!("\n{}", result.feedback);

    super::record_band(&config, &record, section, result.score)
}
