//! The `bandscore init` command.

use anyhow::{Context, Result};

use bandscore_providers::config::STARTER_CONFIG;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("bandscore.toml");
    if path.exists() {
        println!("bandscore.toml already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, STARTER_CONFIG).context("failed to write bandscore.toml")?;
    println!("Created bandscore.toml");

    println!("\nNext steps:");
    println!("  1. Edit bandscore.toml to choose where progress is stored");
    println!("  2. Run: bandscore writing --file essay.txt --user me --record");
    println!("  3. Run: bandscore progress --user me");

    Ok(())
}
