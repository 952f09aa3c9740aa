//! The `bandscore writing` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use bandscore_core::model::Section;

use crate::RecordArgs;

pub async fn execute(
    file: PathBuf,
    prompt: String,
    min_words: usize,
    record: RecordArgs,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load(config_path.as_deref())?;
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read essay: {}", file.display()))?;

    let evaluator = super::score_evaluator(&config)?;
    let result = evaluator.evaluate_writing(&prompt, &text, min_words).await?;

    println!("Writing band: {:.1}", result.score);
    println!("Words: {} (minimum {min_words})", result.word_count);
    println!("\n{}", result.feedback);
    if !result.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &result.suggestions {
            println!("  - {suggestion}");
        }
    }
    if let Some(improved) = &result.improved_version {
        println!("\nImproved version:\n{improved}");
    }

    super::record_band(&config, &record, Section::Writing, result.score)
}
