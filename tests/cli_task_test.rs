//! Integration tests for task-cli.
//!
//! These tests verify that task commands work correctly through the CLI:
//! - `add`, `list`, `update`, `mark-*` and `delete` all work
//! - unknown ids print "Task not found" and still exit successfully
//! - the JSON document on disk has the expected shape
//! - a missing or corrupt document is treated as an empty list

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Add Tests ===

#[test]
fn test_add_creates_task_and_file() {
    let env = TestEnv::new();

    env.task_cli()
        .args(["add", "Buy groceries"])
        .assert()
        .success()
        .stdout("Added task 1: Buy groceries\n");

    let doc = env.store_json();
    assert_eq!(doc["todos"]["1"]["description"], "Buy groceries");
    assert_eq!(doc["todos"]["1"]["status"], "todo");
    assert_eq!(doc["todos"]["1"]["id"], 1);
}

#[test]
fn test_add_assigns_increasing_ids() {
    let env = TestEnv::new();

    env.task_cli().args(["add", "One"]).assert().success();
    env.task_cli()
        .args(["add", "Two"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task 2: Two"));
}

#[test]
fn test_add_empty_description() {
    let env = TestEnv::new();

    env.task_cli()
        .args(["add", ""])
        .assert()
        .success()
        .stdout("Added task 1: \n");
    assert_eq!(env.store_json()["todos"]["1"]["description"], "");
}

#[test]
fn test_add_without_description_is_usage_error() {
    let env = TestEnv::new();

    env.task_cli()
        .arg("add")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// === List Tests ===

#[test]
fn test_list_empty() {
    let env = TestEnv::new();

    env.task_cli()
        .arg("list")
        .assert()
        .success()
        .stdout("No tasks found\n");
}

#[test]
fn test_list_renders_table() {
    let env = TestEnv::new();
    env.task_cli().args(["add", "Write report"]).assert().success();
    env.task_cli().args(["add", "Call mom"]).assert().success();

    env.task_cli()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Status | ID | Description  | Created At"))
        .stdout(predicate::str::contains("Write report"))
        .stdout(predicate::str::contains("Call mom"))
        .stdout(predicate::str::starts_with("+--------+----+"));
}

#[test]
fn test_list_filter_by_status() {
    let env = TestEnv::new();
    env.task_cli().args(["add", "Todo item"]).assert().success();
    env.task_cli().args(["add", "Done item"]).assert().success();
    env.task_cli().args(["mark-done", "2"]).assert().success();

    env.task_cli()
        .args(["list", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done item"))
        .stdout(predicate::str::contains("Todo item").not());

    env.task_cli()
        .args(["list", "in-progress"])
        .assert()
        .success()
        .stdout("No tasks found\n");
}

#[test]
fn test_list_invalid_status() {
    let env = TestEnv::new();

    env.task_cli()
        .args(["list", "blocked"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown status"));
}

#[test]
fn test_list_json() {
    let env = TestEnv::new();
    env.task_cli().args(["add", "Json task"]).assert().success();

    env.task_cli()
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":1"))
        .stdout(predicate::str::contains("\"description\":\"Json task\""));
}

// === Status Tests ===

#[test]
fn test_mark_in_progress_and_done() {
    let env = TestEnv::new();
    env.task_cli().args(["add", "Ship it"]).assert().success();

    env.task_cli()
        .args(["mark-in-progress", "1"])
        .assert()
        .success()
        .stdout("Marked task 1 as in progress\n");
    assert_eq!(env.store_json()["todos"]["1"]["status"], "in-progress");

    env.task_cli()
        .args(["mark-done", "1"])
        .assert()
        .success()
        .stdout("Marked task 1 as done\n");
    assert_eq!(env.store_json()["todos"]["1"]["status"], "done");

    env.task_cli()
        .args(["mark-todo", "1"])
        .assert()
        .success()
        .stdout("Marked task 1 as todo\n");
}

#[test]
fn test_mark_preserves_created_at() {
    let env = TestEnv::new();
    env.task_cli().args(["add", "Timestamps"]).assert().success();
    let before = env.store_json();

    env.task_cli().args(["mark-done", "1"]).assert().success();
    let after = env.store_json();

    assert_eq!(
        before["todos"]["1"]["created_at"],
        after["todos"]["1"]["created_at"]
    );
    let created = after["todos"]["1"]["created_at"].as_str().unwrap();
    let updated = after["todos"]["1"]["updated_at"].as_str().unwrap();
    let created = chrono::DateTime::parse_from_rfc3339(created).unwrap();
    let updated = chrono::DateTime::parse_from_rfc3339(updated).unwrap();
    assert!(updated >= created);
}

#[test]
fn test_missing_id_is_soft_failure() {
    let env = TestEnv::new();
    env.task_cli().args(["add", "Only one"]).assert().success();
    let before = env.read_store();

    for cmd in ["mark-in-progress", "mark-done", "mark-todo", "delete"] {
        env.task_cli()
            .args([cmd, "42"])
            .assert()
            .success()
            .stdout("Task not found\n");
    }
    env.task_cli()
        .args(["update", "42", "Renamed"])
        .assert()
        .success()
        .stdout("Task not found\n");

    assert_eq!(env.read_store(), before);
}

// === Update / Delete Tests ===

#[test]
fn test_update_description() {
    let env = TestEnv::new();
    env.task_cli().args(["add", "Old text"]).assert().success();

    env.task_cli()
        .args(["update", "1", "New text"])
        .assert()
        .success()
        .stdout("Updated task 1\n");
    assert_eq!(env.store_json()["todos"]["1"]["description"], "New text");
}

#[test]
fn test_delete_then_ids_not_reused() {
    let env = TestEnv::new();
    env.task_cli().args(["add", "First"]).assert().success();
    env.task_cli().args(["add", "Second"]).assert().success();

    env.task_cli()
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout("Deleted task 2\n");
    assert!(env.store_json()["todos"].get("2").is_none());

    env.task_cli()
        .args(["add", "Third"])
        .assert()
        .success()
        .stdout("Added task 3: Third\n");
}

// === Persistence Tests ===

#[test]
fn test_corrupt_file_treated_as_empty() {
    let env = TestEnv::new();
    std::fs::write(env.store_path(), "not json at all").unwrap();

    env.task_cli()
        .arg("list")
        .assert()
        .success()
        .stdout("No tasks found\n");

    env.task_cli()
        .args(["add", "Fresh start"])
        .assert()
        .success()
        .stdout("Added task 1: Fresh start\n");
}

#[test]
fn test_non_utf8_file_treated_as_empty() {
    let env = TestEnv::new();
    std::fs::write(env.store_path(), [0xff, 0xfe, 0x7b, 0x00]).unwrap();

    env.task_cli()
        .arg("list")
        .assert()
        .success()
        .stdout("No tasks found\n");
}

#[test]
fn test_add_when_ids_exhausted() {
    let env = TestEnv::new();
    std::fs::write(
        env.store_path(),
        r#"{"todos": {"18446744073709551615": {"id": 18446744073709551615,
            "description": "Last", "status": "todo",
            "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"}}}"#,
    )
    .unwrap();
    let before = env.read_store();

    env.task_cli()
        .args(["add", "y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no task ids left"));
    assert_eq!(env.read_store(), before);
}

#[test]
fn test_error_follows_output_env() {
    let env = TestEnv::new();
    std::fs::write(
        env.store_path(),
        r#"{"todos": {}, "last_id": 18446744073709551615}"#,
    )
    .unwrap();

    env.task_cli()
        .env("TASK_CLI_OUTPUT", "json")
        .args(["add", "y"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("{\"error\":"))
        .stderr(predicate::str::contains("Error: ").not());
}

#[test]
fn test_reads_legacy_document() {
    let env = TestEnv::new();
    std::fs::write(
        env.store_path(),
        r#"{
    "todos": {
        "4": {
            "id": 4,
            "description": "From the old tool",
            "status": "in-progress",
            "created_at": "2024-03-01T09:30:00.000001",
            "updated_at": "2024-03-01T09:45:00"
        }
    }
}"#,
    )
    .unwrap();

    env.task_cli()
        .args(["list", "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("From the old tool"))
        .stdout(predicate::str::contains("2024-03-01"));

    env.task_cli()
        .args(["add", "Next"])
        .assert()
        .success()
        .stdout("Added task 5: Next\n");
}

#[test]
fn test_file_flag_and_env() {
    let env = TestEnv::new();
    let custom = env.path().join("custom.json");

    env.task_cli()
        .args(["add", "Via flag", "--file"])
        .arg(&custom)
        .assert()
        .success();
    assert!(custom.exists());
    assert!(!env.store_path().exists());

    env.task_cli()
        .env("TASK_CLI_FILE", &custom)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Via flag"));
}

#[test]
fn test_output_env_selects_json() {
    let env = TestEnv::new();

    env.task_cli()
        .env("TASK_CLI_OUTPUT", "json")
        .args(["add", "Json via env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":1"));

    env.task_cli()
        .env("TASK_CLI_OUTPUT", "xml")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TASK_CLI_OUTPUT"));
}

#[test]
fn test_not_found_json() {
    let env = TestEnv::new();

    env.task_cli()
        .args(["--json", "delete", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"found\":false"));
}
