//! CLI tests for the `tm` binary
//!
//! Each test gets its own store directory via a throwaway config file, so
//! tests never touch the real data directory and can run in parallel.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(temp: &TempDir) -> PathBuf {
    let store = temp.path().join("store");
    let config_path = temp.path().join("config.yml");
    std::fs::write(&config_path, format!("store_path: {}\n", store.display())).unwrap();
    config_path
}

fn tm(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tm").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn login_as_alice(config: &Path) {
    tm(config)
        .args(["register", "alice", "secret", "alice@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));
}

#[test]
fn test_task_commands_require_login() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);

    tm(&config)
        .args(["add", "orphan task"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_add_list_and_stats() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);
    login_as_alice(&config);

    tm(&config)
        .args(["add", "Buy milk", "--category", "groceries", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task"));

    tm(&config)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("groceries"));

    // Search that matches nothing
    tm(&config)
        .args(["list", "--search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found"));

    tm(&config)
        .args(["stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total:       1"))
        .stdout(predicate::str::contains("High prio:   1"));
}

#[test]
fn test_add_rejects_empty_text() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);
    login_as_alice(&config);

    tm(&config)
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));

    tm(&config)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet"));
}

#[test]
fn test_export_import_round_trip_via_files() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);
    login_as_alice(&config);

    tm(&config).args(["add", "exported task"]).assert().success();

    let export_path = temp.path().join("backup.json");
    tm(&config)
        .args(["export"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 task(s)"));

    // Wipe by importing an empty snapshot, then restore from the backup
    let empty_path = temp.path().join("empty.json");
    std::fs::write(&empty_path, "{\"tasks\": [], \"history\": []}").unwrap();
    tm(&config)
        .args(["import"])
        .arg(&empty_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 0 task(s)"));

    tm(&config)
        .args(["import"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 task(s)"));

    tm(&config)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exported task"));
}

#[test]
fn test_import_rejects_garbage_and_keeps_state() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);
    login_as_alice(&config);

    tm(&config).args(["add", "survivor"]).assert().success();

    let garbage_path = temp.path().join("garbage.json");
    std::fs::write(&garbage_path, "definitely not json").unwrap();
    tm(&config)
        .args(["import"])
        .arg(&garbage_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid snapshot"));

    tm(&config)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("survivor"));
}

#[test]
fn test_login_logout_cycle() {
    let temp = TempDir::new().unwrap();
    let config = write_config(&temp);
    login_as_alice(&config);

    tm(&config)
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"));

    tm(&config).args(["logout"]).assert().success();

    tm(&config)
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));

    tm(&config)
        .args(["login", "alice", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    tm(&config).args(["login", "alice", "secret"]).assert().success();
}
