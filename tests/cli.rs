// HighlightWizard - tests/cli.rs
//
// Command-line tests: run the built binary against fixture logs and check
// stdout, stderr, and the exit status.

use assert_cmd::{cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// Binary with an isolated config file so the user's config never leaks into
/// test results. An empty config is created unless the test wrote one.
fn wizard(config_dir: &tempfile::TempDir) -> Command {
    let config = config_dir.path().join("config.toml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }
    let mut cmd = cargo_bin_cmd!("highlight-wizard");
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(config_dir.path().join("config.toml"));
    cmd
}

#[test]
fn cli_prints_highlights() {
    let dir = tempfile::tempdir().unwrap();
    wizard(&dir)
        .arg(fixture("match_sample.log"))
        .assert()
        .success()
        .stdout(
            "--- Football Highlights ---\n\
             [12'] GOAL: Header from corner\n\
             [55'] RED_CARD: Second yellow\n\
             -------------------------\n",
        );
}

#[test]
fn cli_all_lists_every_event_first() {
    let dir = tempfile::tempdir().unwrap();
    wizard(&dir)
        .args(["--all", &fixture("match_sample.log")])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("--- All Events ---\n[0'] GAME_START: Match begins\n"))
        .stdout(predicate::str::contains("[34'] YELLOW_CARD: Late tackle"))
        .stdout(predicate::str::contains("--- Football Highlights ---"));
}

#[test]
fn cli_category_override() {
    let dir = tempfile::tempdir().unwrap();
    wizard(&dir)
        .args(["-c", "yellow_card", &fixture("match_sample.log")])
        .assert()
        .success()
        .stdout(predicate::str::contains("[34'] YELLOW_CARD: Late tackle"))
        .stdout(predicate::str::contains("GOAL").not());
}

#[test]
fn cli_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = wizard(&dir)
        .args(["--format", "json", &fixture("match_sample.log")])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["category"], "RED_CARD");
}

#[test]
fn cli_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("highlights.csv");
    wizard(&dir)
        .args(["-f", "csv", "-o"])
        .arg(&out)
        .arg(fixture("full_match.log"))
        .assert()
        .success()
        .stdout("");
    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("timestamp_minutes,category,description,line\n"));
    assert!(csv.contains("23,GOAL,\"Amazing strike, top corner\",7"));
}

#[test]
fn cli_reports_unknown_categories_on_stderr() {
    let dir = tempfile::tempdir().unwrap();
    wizard(&dir)
        .arg(fixture("full_match.log"))
        .assert()
        .success()
        .stderr(
            predicate::str::contains("line 8: unknown event type 'PENALTY', treating as OTHER")
                .count(1),
        )
        .stderr(predicate::str::contains("unknown event type 'OFFSIDE'").count(1));
}

#[test]
fn cli_uses_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[highlights]\ncategories = [\"FULL_TIME\"]\n",
    )
    .unwrap();
    wizard(&dir)
        .arg(fixture("match_sample.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[90'] FULL_TIME: End of match"))
        .stdout(predicate::str::contains("GOAL").not());
}

#[test]
fn cli_format_error_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    wizard(&dir)
        .arg(fixture("bad_timestamp.log"))
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("line 3"))
        .stderr(predicate::str::contains("out of range").count(1));
}

#[test]
fn cli_missing_file_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    wizard(&dir)
        .arg(fixture("no_such_match.log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not open"));
}

#[test]
fn cli_invalid_keyword_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    wizard(&dir)
        .args(["-k", "(", &fixture("match_sample.log")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid keyword regex"));
}

#[test]
fn cli_warns_about_missing_explicit_config() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("highlight-wizard")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.path().join("typo.toml"))
        .arg(fixture("match_sample.log"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[12'] GOAL: Header from corner"))
        .stderr(predicate::str::contains("typo.toml' does not exist"));
}
