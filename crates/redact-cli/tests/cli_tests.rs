//! Integration tests for the `redact` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the check, remove,
//! members, and structure subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, logging, and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

/// Helper: path to the BSM fixture shared with redact-core's tests.
fn bsm_json_path() -> &'static str {
    concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../redact-core/tests/fixtures/bsm.json"
    )
}

fn bsm_json() -> String {
    std::fs::read_to_string(bsm_json_path()).expect("bsm.json fixture must exist")
}

fn scenario_json() -> &'static str {
    r#"{"a":{"b":1,"c":{"target":2}},"d":[{"target":3}]}"#
}

/// Helper: the binary with `RUST_LOG` cleared so log-level flags apply.
fn redact() -> Command {
    let mut cmd = Command::cargo_bin("redact").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_present_key_prints_true_and_location() {
    redact()
        .args(["check", "--key", "target"])
        .write_stdin(scenario_json())
        .assert()
        .success()
        .stdout("true\n/a/c/target\n");
}

#[test]
fn check_absent_key_prints_false() {
    redact()
        .args(["check", "--key", "zzz"])
        .write_stdin(scenario_json())
        .assert()
        .success()
        .stdout("false\n");
}

#[test]
fn check_within_sub_tree() {
    redact()
        .args(["check", "--key", "target", "--at", "d"])
        .write_stdin(scenario_json())
        .assert()
        .success()
        .stdout("true\n/0/target\n");

    redact()
        .args(["check", "--key", "latency", "--at", "payload", "-i", bsm_json_path()])
        .assert()
        .success()
        .stdout("false\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// remove
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn remove_twice_walks_scenario() {
    let first = redact()
        .args(["remove", "--key", "target"])
        .write_stdin(scenario_json())
        .output()
        .expect("remove should run");
    assert!(first.status.success());
    let doc = stdout_json(&first);
    assert_eq!(doc, json!({"a": {"b": 1, "c": {}}, "d": [{"target": 3}]}));

    let second = redact()
        .args(["remove", "--key", "target"])
        .write_stdin(doc.to_string())
        .output()
        .expect("remove should run");
    assert!(second.status.success());
    assert_eq!(stdout_json(&second), json!({"a": {"b": 1, "c": {}}, "d": [{}]}));
}

#[test]
fn remove_absent_key_keeps_document_and_warns() {
    let output = redact()
        .args(["remove", "--key", "zzz"])
        .write_stdin(scenario_json())
        .output()
        .expect("remove should run");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), format!("{}\n", scenario_json()));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[LOG] No 'zzz' member found"), "stderr: {stderr}");
}

#[test]
fn remove_file_to_file_pretty() {
    let output_path = "/tmp/redact-test-remove-output.json";
    let _ = std::fs::remove_file(output_path);

    redact()
        .args(["remove", "--key", "serialId", "--pretty", "-i", bsm_json_path(), "-o", output_path])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(content.starts_with("{\n  \"metadata\""), "output should be pretty JSON");
    let doc: Value = serde_json::from_str(&content).unwrap();
    assert!(doc["metadata"].get("serialId").is_none());
    assert_eq!(doc["metadata"]["latency"], 1);

    let _ = std::fs::remove_file(output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// members
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn members_preset_redacts_bsm_part_ii() {
    let output = redact()
        .args(["members", "--preset", "bsm", "-i", bsm_json_path()])
        .output()
        .expect("members should run");
    assert!(output.status.success());

    let doc = stdout_json(&output);
    let value = doc["payload"]["data"]["partII"][1]["value"].as_object().unwrap();
    let keys: Vec<&str> = value.keys().map(String::as_str).collect();
    assert_eq!(keys, ["classDetails", "regional", "vehicleData", "weatherProbe"]);

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[LOG] Executing program"));
    assert!(stderr.contains(
        "[LOG] Is the 'accelLong' member present... Before redaction? 1 ----- After redaction? 0"
    ));
    assert!(stderr.contains("[LOG] Program finished executing"));
}

#[test]
fn members_explicit_list_with_path() {
    let output = redact()
        .args(["members", "--members", "yawRate, sunSensor,,", "--at", "payload.data.partII"])
        .write_stdin(bsm_json())
        .output()
        .expect("members should run");
    assert!(output.status.success());

    let doc = stdout_json(&output);
    let value = &doc["payload"]["data"]["partII"][1]["value"];
    assert!(value.get("yawRate").is_none());
    assert!(value.get("sunSensor").is_none());
    assert_eq!(value["accelLong"], "test");
}

#[test]
fn members_writes_json_report() {
    let report_path = "/tmp/redact-test-members-report.json";
    let _ = std::fs::remove_file(report_path);

    redact()
        .args(["members", "--members", "regional", "--at", "payload.data.partII", "--report", report_path])
        .write_stdin(bsm_json())
        .assert()
        .success()
        .stderr(predicate::str::contains("Still present after redaction: regional"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(report_path).expect("report must exist"))
            .unwrap();
    assert_eq!(
        report,
        json!({"outcomes": [{"member": "regional", "present_before": true, "removed": true, "present_after": true}]})
    );

    let _ = std::fs::remove_file(report_path);
}

#[test]
fn members_without_any_names_fails() {
    redact()
        .arg("members")
        .write_stdin(scenario_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No members to redact"));
}

#[test]
fn members_unknown_preset_fails() {
    redact()
        .args(["members", "--preset", "google"])
        .write_stdin(scenario_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preset: 'google'"));
}

#[test]
fn members_bad_path_fails() {
    redact()
        .args(["members", "--members", "x", "--at", "payload.partII"])
        .write_stdin(bsm_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to resolve redaction path"));
}

// ─────────────────────────────────────────────────────────────────────────────
// structure
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn structure_lists_members_and_kinds() {
    redact()
        .arg("structure")
        .write_stdin(scenario_json())
        .assert()
        .success()
        .stdout("a - Object\n  b - Number\n  c - Object\n    target - Number\nd - Array\n    target - Number\n");
}

#[test]
fn structure_of_sub_tree() {
    redact()
        .args(["structure", "--at", "payload.data.coreData.size", "-i", bsm_json_path()])
        .assert()
        .success()
        .stdout("length - Number\nwidth - Number\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging and errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn verbose_emits_debug_lines() {
    redact()
        .args(["-v", "check", "--key", "target"])
        .write_stdin(scenario_json())
        .assert()
        .success()
        .stderr(predicate::str::contains("[DEBUG] 'target' present: true"));
}

#[test]
fn quiet_suppresses_info_lines() {
    redact()
        .args(["-q", "check", "--key", "target"])
        .write_stdin(scenario_json())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn invalid_json_fails() {
    redact()
        .args(["check", "--key", "a"])
        .write_stdin("this is not valid json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse input JSON"));
}

#[test]
fn missing_input_file_fails() {
    redact()
        .args(["check", "--key", "a", "-i", "/nonexistent/path/doc.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn help_flag_shows_usage() {
    redact()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("members"))
        .stdout(predicate::str::contains("structure"));
}
