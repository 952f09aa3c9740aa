//! The `bandscore record` command.

use std::path::PathBuf;

use anyhow::Result;

use bandscore_core::model::Section;

pub fn execute(
    user: String,
    section: Section,
    score: f64,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load(config_path.as_deref())?;
    let aggregator = super::aggregator(&config)?;

    if !aggregator.record_completion(&user, section, score) {
        anyhow::bail!("score {score} for {section} was not recorded (expected 0 to 100)");
    }
    println!("Recorded {section} {score}% for {user}");
    Ok(())
}
