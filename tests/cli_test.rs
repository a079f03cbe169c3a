#![cfg(feature = "cli")]

use anyhow::Result;
use krs_validator::ValidationReport;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn demo_plan() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/krs-plan.toml")
}

fn krs_check(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_krs-check"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()?)
}

fn write_plan(dir: &TempDir, content: &str) -> Result<String> {
    let path = dir.path().join("plan.toml");
    std::fs::write(&path, content)?;
    Ok(path.to_string_lossy().into_owned())
}

const SMALL_PLAN: &str = r#"
[policy]
max_credits = 6

[student]
id = "2205"
name = "Eka"
requested = ["ALG210", "STA220"]

[[courses]]
code = "ALG210"
credits = 3
schedule = [{ day = "Wed", start = "13:00", end = "15:00" }]

[[courses]]
code = "STA220"
credits = 3
schedule = [{ day = "Wed", start = "15:00", end = "24:00" }]
"#;

#[test]
fn test_rejected_plan_exits_1_with_json_report() -> Result<()> {
    let plan = demo_plan();
    let output = krs_check(&["--plan", plan.to_str().unwrap(), "--format", "json"])?;

    assert_eq!(output.status.code(), Some(1));
    let report: ValidationReport = serde_json::from_slice(&output.stdout)?;
    assert_eq!(report.student_id, "2201");
    let failing: Vec<&str> = report.failures().map(|v| v.rule.as_str()).collect();
    assert_eq!(failing, vec!["prerequisite", "schedule_conflict"]);
    Ok(())
}

#[test]
fn test_accepted_plan_exits_0() -> Result<()> {
    let dir = TempDir::new()?;
    let plan = write_plan(&dir, SMALL_PLAN)?;

    let output = krs_check(&["--plan", &plan])?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Registration accepted for Eka"), "{}", stdout);
    Ok(())
}

#[test]
fn test_overrides_change_the_outcome() -> Result<()> {
    let dir = TempDir::new()?;
    let plan = write_plan(&dir, SMALL_PLAN)?;

    let output = krs_check(&["--plan", &plan, "--max-credits", "5"])?;
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("[credit_limit]"), "{}", stdout);

    let demo = demo_plan();
    let output = krs_check(&["--plan", demo.to_str().unwrap(), "--rules", "credit_limit"])?;
    assert_eq!(output.status.code(), Some(0));
    Ok(())
}

#[test]
fn test_input_and_config_errors_exit_2() -> Result<()> {
    let output = krs_check(&["--plan", "does/not/exist.toml"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Suggestion"));

    let dir = TempDir::new()?;
    let misspelled = write_plan(&dir, &SMALL_PLAN.replace("max_credits = 6", "max_credit = 3"))?;
    let output = krs_check(&["--plan", &misspelled])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let unknown_course = write_plan(&dir, &SMALL_PLAN.replace(r#""STA220"]"#, r#""STA999"]"#))?;
    let output = krs_check(&["--plan", &unknown_course])?;
    assert_eq!(output.status.code(), Some(2));

    let zero_limit = write_plan(&dir, SMALL_PLAN)?;
    let output = krs_check(&["--plan", &zero_limit, "--max-credits", "0"])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn test_json_logs_stay_off_stdout() -> Result<()> {
    let plan = demo_plan();
    let output = krs_check(&[
        "--plan",
        plan.to_str().unwrap(),
        "--format",
        "json",
        "--json-logs",
    ])?;

    assert_eq!(output.status.code(), Some(1));
    serde_json::from_slice::<ValidationReport>(&output.stdout)?;

    let stderr = String::from_utf8(output.stderr)?;
    let warnings: Vec<serde_json::Value> = stderr
        .lines()
        .filter_map(|line| serde_json::from_str(line).ok())
        .filter(|event: &serde_json::Value| event["level"] == "WARN")
        .collect();
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0]["fields"]["rule"], "prerequisite");
    assert_eq!(warnings[1]["target"], "krs_validator::adapters::log_sink");
    Ok(())
}
