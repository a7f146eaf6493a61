use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn toolvet() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolvet");
    cmd.current_dir(fixtures_dir());
    cmd.env_remove("TOOLVET_LOG");
    cmd
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn json_report(args: &[&str]) -> serde_json::Value {
    let output = toolvet()
        .args(args)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap()
}

// Exit codes

#[test]
fn test_valid_input_exits_zero() {
    toolvet()
        .arg("valid.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("search-users"))
        .stdout(predicate::str::contains("Maturity:"));
}

#[test]
fn test_error_issue_exits_one() {
    toolvet()
        .arg("invalid.json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("LLM-001"));
}

#[test]
fn test_strict_fails_on_warnings() {
    toolvet().arg("warnings.yaml").assert().success();
    toolvet()
        .arg("warnings.yaml")
        .arg("--strict")
        .assert()
        .code(1);
}

#[test]
fn test_strict_passes_without_warnings() {
    toolvet().arg("valid.json").arg("--strict").assert().success();
}

#[test]
fn test_missing_input_exits_two() {
    toolvet()
        .arg("does-not-exist.json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does-not-exist.json"));
}

#[test]
fn test_paths_required() {
    toolvet().assert().failure();
}

// Configuration

#[test]
fn test_explicit_config_disables_rule() {
    toolvet()
        .arg("invalid.json")
        .arg("--config")
        .arg("disable-llm-001.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("LLM-001").not());
}

#[test]
fn test_broken_explicit_config_exits_two() {
    toolvet()
        .arg("invalid.json")
        .arg("--config")
        .arg("broken-config.toml")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_missing_explicit_config_exits_two() {
    toolvet()
        .arg("valid.json")
        .arg("--config")
        .arg("nope.toml")
        .assert()
        .code(2);
}

#[test]
fn test_rule_override_flag() {
    toolvet()
        .arg("invalid.json")
        .arg("--rule")
        .arg("LLM-001=off")
        .assert()
        .success();

    toolvet()
        .arg("warnings.yaml")
        .arg("--rule")
        .arg("SEC-001=error")
        .assert()
        .code(1);
}

#[test]
fn test_invalid_override_is_ignored() {
    toolvet()
        .arg("invalid.json")
        .arg("--rule")
        .arg("LLM-001=sometimes")
        .assert()
        .code(1);
}

#[test]
fn test_discovered_config_is_used() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(fixtures_dir().join("invalid.json"), dir.path().join("tools.json")).unwrap();
    std::fs::write(dir.path().join(".toolvet.toml"), "[rules]\nLLM-001 = \"off\"\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolvet");
    let output = cmd
        .current_dir(dir.path())
        .arg("tools.json")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert!(
        json["metadata"]["configSource"]
            .as_str()
            .unwrap()
            .ends_with(".toolvet.toml")
    );
}

#[test]
fn test_config_format_key_selects_output() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(fixtures_dir().join("valid.json"), dir.path().join("tools.json")).unwrap();
    std::fs::write(dir.path().join("toolvet.toml"), "[output]\nformat = \"json\"\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolvet");
    cmd.current_dir(dir.path())
        .arg("tools.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"summary\""));
}

// JSON format

#[test]
fn test_format_json_report_shape() {
    let json = json_report(&["valid.json", "invalid.json"]);

    assert_eq!(json["valid"], false);
    assert_eq!(json["summary"]["totalTools"], 2);
    assert_eq!(json["summary"]["validTools"], 1);
    assert!(json["summary"]["maturityScore"].is_number());
    assert_eq!(json["metadata"]["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["metadata"]["llmAnalysis"], false);

    let issue = json["issues"]
        .as_array()
        .unwrap()
        .iter()
        .find(|issue| issue["id"] == "LLM-001")
        .unwrap();
    assert_eq!(issue["severity"], "error");
    assert_eq!(issue["category"], "llm-compatibility");
    assert_eq!(issue["tool"], "x");
    assert_eq!(issue["path"], "/description");
}

#[test]
fn test_format_json_reports_source_file() {
    let json = json_report(&["valid.json"]);
    assert_eq!(json["tools"][0]["source"], "valid.json");
}

#[test]
fn test_format_json_cross_tool_duplicates() {
    let json = json_report(&["duplicates.json"]);
    let duplicates: Vec<_> = json["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|issue| issue["id"] == "SCH-008")
        .collect();
    assert_eq!(duplicates.len(), 2);
    assert!(
        duplicates[0]["message"]
            .as_str()
            .unwrap()
            .contains("'update-customer'")
    );
}

#[test]
fn test_stdin_input() {
    toolvet()
        .arg("-")
        .arg("--format")
        .arg("json")
        .write_stdin(std::fs::read_to_string(fixtures_dir().join("invalid.json")).unwrap())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"LLM-001\""));
}

// SARIF format

#[test]
fn test_format_sarif_produces_valid_log() {
    let output = toolvet()
        .arg("invalid.json")
        .arg("--format")
        .arg("sarif")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(json["version"], "2.1.0");
    assert!(json["$schema"].as_str().unwrap().contains("sarif-2.1.0"));
    assert_eq!(json["runs"][0]["tool"]["driver"]["name"], "toolvet");

    let rules = json["runs"][0]["tool"]["driver"]["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 32);

    let results = json["runs"][0]["results"].as_array().unwrap();
    assert!(results.iter().any(|r| r["ruleId"] == "LLM-001" && r["level"] == "error"));
}

// Text format and misc flags

#[test]
fn test_format_text_is_default() {
    toolvet()
        .arg("valid.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\"").not());
}

#[test]
fn test_no_color_output_has_no_escapes() {
    toolvet()
        .arg("invalid.json")
        .arg("--no-color")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_list_rules() {
    toolvet()
        .arg("--list-rules")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("SCH-001"))
        .stdout(predicate::str::contains("BP-005"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    toolvet()
        .arg("valid.json")
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("validation complete"));
}

#[test]
fn test_config_verbose_enables_debug_logging() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy(fixtures_dir().join("valid.json"), dir.path().join("tools.json")).unwrap();
    std::fs::write(dir.path().join(".toolvet.toml"), "[output]\nverbose = true\n").unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("toolvet");
    cmd.current_dir(dir.path())
        .env_remove("TOOLVET_LOG")
        .arg("tools.json")
        .assert()
        .success()
        .stderr(predicate::str::contains("starting validation"))
        .stderr(predicate::str::contains("resolved config source"));
}

#[test]
fn test_quiet_by_default() {
    toolvet()
        .arg("valid.json")
        .assert()
        .success()
        .stderr(predicate::str::contains("starting validation").not());
}

#[test]
fn test_help_shows_options() {
    toolvet()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--rule"))
        .stdout(predicate::str::contains("--strict"));
}
