//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bandscore() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("bandscore").unwrap();
    cmd.env_remove("BANDSCORE_STORE_PATH").env_remove("RUST_LOG");
    cmd
}

/// Write a config with a file store inside `dir` and no simulated latency.
fn write_config(dir: &Path) -> PathBuf {
    let store = dir.join("data").join("progress.json");
    let config = format!(
        r#"
[store]
type = "file"
path = '{}'

[evaluator]
type = "heuristic"
writing_latency_ms = 0
speaking_latency_ms = 0
seed = 42
"#,
        store.display()
    );
    let path = dir.join("bandscore.toml");
    std::fs::write(&path, config).unwrap();
    path
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    bandscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bandscore.toml"));

    assert!(dir.path().join("bandscore.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    bandscore().current_dir(dir.path()).arg("init").assert().success();

    bandscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn writing_scores_and_suggests() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let essay = write_file(dir.path(), "essay.txt", "One. Two. Three.");

    bandscore()
        .arg("--config")
        .arg(&config)
        .arg("writing")
        .arg("--file")
        .arg(&essay)
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing band: 3.5"))
        .stdout(predicate::str::contains("Words: 3 (minimum 250)"))
        .stdout(predicate::str::contains("Suggestions:"));
}

#[test]
fn writing_records_percentage() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let essay = write_file(
        dir.path(),
        "essay.txt",
        "However, this is good. It works. We agree. They left. She stayed.",
    );

    bandscore()
        .arg("--config")
        .arg(&config)
        .args(["writing", "--min-words", "10", "--user", "ana", "--record", "--file"])
        .arg(&essay)
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing band: 6.5"))
        .stdout(predicate::str::contains("Recorded writing 72% for ana"));

    assert!(dir.path().join("data").join("progress.json").exists());
}

#[test]
fn record_requires_user() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let essay = write_file(dir.path(), "essay.txt", "Short.");

    bandscore()
        .arg("--config")
        .arg(&config)
        .args(["writing", "--record", "--file"])
        .arg(&essay)
        .assert()
        .failure();
}

#[test]
fn reading_marks_answer_sheet() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let key = write_file(
        dir.path(),
        "key.json",
        r#"{"1": "A", "2": "B", "3": "true", "4": "Paris"}"#,
    );
    let answers = write_file(
        dir.path(),
        "answers.json",
        r#"{"1": "a", "2": "C", "3": " TRUE ", "4": "paris", "99": "ignored"}"#,
    );

    bandscore()
        .arg("--config")
        .arg(&config)
        .arg("reading")
        .arg("--answers")
        .arg(&answers)
        .arg("--key")
        .arg(&key)
        .assert()
        .success()
        .stdout(predicate::str::contains("reading band: 7.0"))
        .stdout(predicate::str::contains("Correct: 3/4"))
        .stdout(predicate::str::contains("Excellent reading"));
}

#[test]
fn listening_rejects_malformed_sheet() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let key = write_file(dir.path(), "key.json", r#"["not", "a", "map"]"#);
    let answers = write_file(dir.path(), "answers.json", "{}");

    bandscore()
        .arg("--config")
        .arg(&config)
        .arg("listening")
        .arg("--answers")
        .arg(&answers)
        .arg("--key")
        .arg(&key)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn speaking_is_labelled_placeholder() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    bandscore()
        .arg("--config")
        .arg(&config)
        .args(["speaking", "--prompt", "Describe your hometown", "--duration", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Speaking band:"))
        .stdout(predicate::str::contains("placeholder"));
}

#[test]
fn record_and_progress_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    for (section, score) in [("reading", "80"), ("reading", "60"), ("writing", "50")] {
        bandscore()
            .arg("--config")
            .arg(&config)
            .args(["record", "--user", "ana", "--section", section, "--score", score])
            .assert()
            .success();
    }
    bandscore()
        .arg("--config")
        .arg(&config)
        .args(["record", "--user", "ben", "--section", "speaking", "--score", "10"])
        .assert()
        .success();

    let output = bandscore()
        .arg("--config")
        .arg(&config)
        .args(["progress", "--user", "ana", "--format", "json", "--history"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["user_id"], "ana");
    assert_eq!(report["summary"]["reading"], 70);
    assert_eq!(report["summary"]["writing"], 50);
    assert_eq!(report["summary"]["speaking"], 0);
    assert_eq!(report["summary"]["overall"], 60);
    assert_eq!(report["history"].as_array().map(|h| h.len()), Some(3));
}

#[test]
fn progress_text_table() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    bandscore()
        .arg("--config")
        .arg(&config)
        .args(["record", "--user", "ana", "--section", "Listening", "--score", "90"])
        .assert()
        .success();

    bandscore()
        .arg("--config")
        .arg(&config)
        .args(["progress", "--user", "ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress for ana"))
        .stdout(predicate::str::contains("listening"))
        .stdout(predicate::str::contains("90%"));
}

#[test]
fn progress_for_unknown_user_is_zero() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    let output = bandscore()
        .arg("--config")
        .arg(&config)
        .args(["progress", "--user", "nobody", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["overall"], 0);
    assert!(report.get("history").is_none());
}

#[test]
fn record_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());

    bandscore()
        .arg("--config")
        .arg(&config)
        .args(["record", "--user", "ana", "--section", "reading", "--score", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));

    bandscore()
        .arg("--config")
        .arg(&config)
        .args(["record", "--user", "ana", "--section", "reading", "--score", "-5"])
        .assert()
        .failure();

    assert!(!dir.path().join("data").join("progress.json").exists());
}

#[test]
fn record_rejects_unknown_section() {
    bandscore()
        .args(["record", "--user", "ana", "--section", "grammar", "--score", "50"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown section"));
}

#[test]
fn overall_band() {
    bandscore()
        .args(["overall", "6.5", "7", "5.5", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall band: 6.5"));
}

#[test]
fn overall_rejects_out_of_range() {
    bandscore()
        .args(["overall", "6.5", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 0 to 9"));
}

#[test]
fn missing_config_file() {
    bandscore()
        .args(["--config", "no_such_config.toml", "progress", "--user", "ana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn store_path_env_override() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path());
    let override_path = dir.path().join("elsewhere.json");

    bandscore()
        .env("BANDSCORE_STORE_PATH", &override_path)
        .arg("--config")
        .arg(&config)
        .args(["record", "--user", "ana", "--section", "reading", "--score", "40"])
        .assert()
        .success();

    assert!(override_path.exists());
    assert!(!dir.path().join("data").join("progress.json").exists());
}

#[test]
fn help_output() {
    bandscore()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("IELTS-style practice scoring"));
}

#[test]
fn version_output() {
    bandscore()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bandscore"));
}
