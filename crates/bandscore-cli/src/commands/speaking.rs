//! The `bandscore speaking` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use bandscore_core::model::{Section, SpeakingSubmission};

use crate::RecordArgs;

pub async fn execute(
    prompt: String,
    duration: u32,
    transcript: Option<PathBuf>,
    record: RecordArgs,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load(config_path.as_deref())?;
    let transcript = transcript
        .map(|path| {
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read transcript: {}", path.display()))
        })
        .transpose()?;

    let evaluator = super::score_evaluator(&config)?;
    let submission = SpeakingSubmission {
        prompt,
        transcript,
        duration_secs: duration,
    };
    let result = evaluator.evaluate_speaking(&submission).await?;

    println!("Speaking band: {:.1}", result.score);
    println!("\n{}", result.feedback);
    if evaluator.backend_name() == "heuristic" {
        println!("\nNote: speaking scores are placeholders and do not assess the recording.");
    }

    super::record_band(&config, &record, Section::Speaking, result.score)
}
