//! The `bandscore progress` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use bandscore_core::model::{ProgressRecord, Section, UserProgressSummary};
use bandscore_core::statistics::percent_to_band;

#[derive(Serialize)]
struct ProgressReport<'a> {
    user_id: &'a str,
    summary: &'a UserProgressSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<&'a [ProgressRecord]>,
}

pub fn execute(
    user: String,
    format: String,
    history: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load(config_path.as_deref())?;
    let aggregator = super::aggregator(&config)?;

    let summary = aggregator.get_progress(&user);
    let records = if history {
        aggregator.history(&user)
    } else {
        Vec::new()
    };

    match format.as_str() {
        "json" => {
            let report = ProgressReport {
                user_id: &user,
                summary: &summary,
                history: history.then_some(records.as_slice()),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => print_text(&user, &summary, history.then_some(records.as_slice())),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_text(user: &str, summary: &UserProgressSummary, history: Option<&[ProgressRecord]>) {
    println!("Progress for {user}\n");

    let mut table = Table::new();
    table.set_header(vec!["Section", "Average", "Band", "Attempts"]);
    for section in Section::ALL {
        let attempts = summary.attempts(section);
        let (average, band) = if attempts == 0 {
            ("-".to_string(), "-".to_string())
        } else {
            let value = summary.get(section);
            (
                format!("{value}%"),
                format!("{:.1}", percent_to_band(value as f64)),
            )
        };
        table.add_row(vec![
            Cell::new(section),
            Cell::new(average),
            Cell::new(band),
            Cell::new(attempts),
        ]);
    }
    table.add_row(vec![
        Cell::new("overall"),
        Cell::new(format!("{}%", summary.overall)),
        Cell::new(format!("{:.1}", percent_to_band(summary.overall as f64))),
        Cell::new(summary.attempts.iter().sum::<usize>()),
    ]);
    println!("{table}");

    if let Some(records) = history {
        println!("\nHistory:");
        if records.is_empty() {
            println!("  (no attempts recorded)");
        }
        for record in records {
            println!(
                "  {}  {:<9}  {:>5.1}%",
                record.timestamp.format("%Y-%m-%d %H:%M"),
                record.section.to_string(),
                record.score
            );
        }
    }
}
