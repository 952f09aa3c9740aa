//! The `bandscore overall` command.

use anyhow::Result;

use bandscore_core::scoring::overall_band;

pub fn execute(scores: Vec<f64>) -> Result<()> {
    if let Some(bad) = scores.iter().find(|s| !(0.0..=9.0).contains(*s)) {
        anyhow::bail!("band {bad} is outside 0 to 9");
    }
    println!("Overall band: {:.1}", overall_band(&scores));
    Ok(())
}
