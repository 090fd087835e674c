//! CLI contract tests
//!
//! Runs the built binary against layout files in a temp directory.

use std::path::Path;
use std::process::{Command, Output};

const BALANCED: &str = r#"{
    "canvas": {"width": 1000, "height": 1000},
    "items": [
        {"x": 0.0, "y": 0.40, "width": 0.10, "height": 0.20},
        {"x": 0.90, "y": 0.40, "width": 0.10, "height": 0.20}
    ]
}"#;

const LOPSIDED: &str = r#"{
    "canvas": {"width": 1000, "height": 1000},
    "items": [
        {"x": 0.6, "y": 0.1, "width": 0.35, "height": 0.2},
        {"x": 0.7, "y": 0.6, "width": 0.25, "height": 0.3}
    ]
}"#;

fn layoutscore(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_layoutscore"))
        .args(args)
        .arg("--no-color")
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("LAYOUTSCORE_CONFIG")
        .output()
        .expect("failed to run layoutscore")
}

fn setup() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("balanced.json"), BALANCED).unwrap();
    std::fs::write(dir.path().join("lopsided.json"), LOPSIDED).unwrap();
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn rate_single_file_as_json() {
    let dir = setup();
    let output = layoutscore(dir.path(), &["rate", "balanced.json", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert!(json["score"].as_u64().unwrap() <= 100);
    assert_eq!(json["metrics"].as_array().unwrap().len(), 4);
    assert_eq!(json["metrics"][0]["section"], "balance");
    assert_eq!(json["metrics"][0]["metrics"][0]["type"], "balance_horizontal");
    assert_eq!(json["metrics"][0]["metrics"][0]["score"], 100);
}

#[test]
fn rate_text_report() {
    let dir = setup();
    let output = layoutscore(dir.path(), &["rate", "balanced.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Layout Rating"));
    assert!(out.contains("BALANCE"));
    assert!(out.contains("Horizontal balance"));
    assert!(out.contains("Excellent balance!"));
}

#[test]
fn rate_batch_emits_one_line_per_file() {
    let dir = setup();
    let output = layoutscore(
        dir.path(),
        &["rate", "balanced.json", "lopsided.json", "-f", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<serde_json::Value> = out
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("JSON line"))
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["file"], "balanced.json");
    assert_eq!(lines[1]["file"], "lopsided.json");
    assert_eq!(lines[2]["layouts"], 2);
    assert!(lines[2]["consistency"].as_u64().unwrap() <= 100);
}

#[test]
fn rate_batch_text_ends_with_consistency() {
    let dir = setup();
    let output = layoutscore(dir.path(), &["rate", "balanced.json", "balanced.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Consistency: 100/100 across 2 rated layouts"));
}

#[test]
fn batch_failure_is_isolated_but_fails_the_run() {
    let dir = setup();
    std::fs::write(dir.path().join("broken.json"), r#"{"items": []}"#).unwrap();

    let output = layoutscore(
        dir.path(),
        &["rate", "balanced.json", "broken.json", "-f", "json"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("missing 'canvas'"));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 3);
    let good: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    let bad: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    let summary: serde_json::Value = serde_json::from_str(lines[2]).unwrap();
    assert!(good["score"].is_u64());
    assert!(bad["error"].as_str().unwrap().contains("missing 'canvas'"));
    assert_eq!(summary["layouts"], 1);
    assert_eq!(summary["consistency"], 0);
}

#[test]
fn heuristic_flag_limits_groups() {
    let dir = setup();
    let output = layoutscore(
        dir.path(),
        &["rate", "balanced.json", "-f", "json", "-H", "harmony"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let groups = json["metrics"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["section"], "harmony");
}

#[test]
fn unknown_heuristic_is_reported() {
    let dir = setup();
    let output = layoutscore(dir.path(), &["rate", "balanced.json", "-H", "contrast"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("contrast"), "stderr: {}", err);
    assert!(err.contains("balance, equilibrium, symmetry, harmony"));
}

#[test]
fn fail_under_sets_exit_code() {
    let dir = setup();
    let pass = layoutscore(dir.path(), &["rate", "balanced.json", "--fail-under", "0"]);
    assert!(pass.status.success(), "stderr: {}", stderr(&pass));

    let fail = layoutscore(dir.path(), &["rate", "lopsided.json", "--fail-under", "100"]);
    assert!(!fail.status.success());
    assert!(stderr(&fail).contains("--fail-under=100"));
}

#[test]
fn strict_mode_rejects_out_of_bounds_elements() {
    let dir = setup();
    std::fs::write(
        dir.path().join("overflow.json"),
        r#"{"canvas": {"width": 100, "height": 100},
            "items": [{"x": 0.1, "y": 0.1, "width": 0.5, "height": 0.5},
                      {"x": 0.8, "y": 0.8, "width": 0.5, "height": 0.5},
                      {"x": 0.1, "y": 0.6, "width": 1.2, "height": 0.3}]}"#,
    )
    .unwrap();

    let lenient = layoutscore(dir.path(), &["rate", "overflow.json"]);
    assert!(lenient.status.success(), "stderr: {}", stderr(&lenient));

    let strict = layoutscore(dir.path(), &["rate", "overflow.json", "--strict"]);
    assert!(!strict.status.success());
    assert!(stderr(&strict).contains("#2"), "stderr: {}", stderr(&strict));
}

#[test]
fn config_file_selects_heuristics_and_format() {
    let dir = setup();
    std::fs::write(
        dir.path().join("layoutscore.toml"),
        "heuristics = [\"symmetry\", \"balance\"]\n\n[defaults]\nformat = \"json\"\n",
    )
    .unwrap();

    let output = layoutscore(dir.path(), &["rate", "balanced.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("JSON output");
    let sections: Vec<&str> = json["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["section"].as_str().unwrap())
        .collect();
    assert_eq!(sections, vec!["symmetry", "balance"]);
}

#[test]
fn check_reports_unregistered_heuristic() {
    let dir = setup();
    std::fs::write(
        dir.path().join("layoutscore.toml"),
        "heuristics = [\"balance\", \"contrast\"]\n",
    )
    .unwrap();

    let output = layoutscore(dir.path(), &["check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("contrast"));
}

#[test]
fn init_then_check() {
    let dir = tempfile::tempdir().unwrap();
    let init = layoutscore(dir.path(), &["init"]);
    assert!(init.status.success(), "stderr: {}", stderr(&init));
    assert!(dir.path().join("layoutscore.toml").exists());

    let check = layoutscore(dir.path(), &["check"]);
    assert!(check.status.success(), "stderr: {}", stderr(&check));
    assert!(stdout(&check).contains("Configuration OK"));

    let again = layoutscore(dir.path(), &["init"]);
    assert!(!again.status.success());
}

#[test]
fn heuristics_lists_metric_ids() {
    let dir = tempfile::tempdir().unwrap();
    let output = layoutscore(dir.path(), &["heuristics"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    for id in [
        "balance_horizontal",
        "equilibrium_vertical",
        "symmetry_vertical",
        "harmony_proportion",
    ] {
        assert!(out.contains(id), "missing {id} in {out}");
    }
}

#[test]
fn output_flag_writes_file() {
    let dir = setup();
    let output = layoutscore(
        dir.path(),
        &["rate", "balanced.json", "-f", "markdown", "-o", "report.md"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let report = std::fs::read_to_string(dir.path().join("report.md")).unwrap();
    assert!(report.contains("Layout Rating"));
    assert!(report.contains("| Metric | Score | Comment |"));
}

#[test]
fn output_flag_with_directory_names_report_by_format() {
    let dir = setup();
    std::fs::create_dir(dir.path().join("out")).unwrap();
    let output = layoutscore(
        dir.path(),
        &["rate", "balanced.json", "-f", "json", "-o", "out"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let report = std::fs::read_to_string(dir.path().join("out").join("report.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
    assert_eq!(json["metrics"].as_array().unwrap().len(), 4);
}
