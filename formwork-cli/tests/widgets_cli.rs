use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn formwork_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("formwork"));
    cmd.env("HOME", home).env("USERPROFILE", home).env_remove("RUST_LOG");
    cmd
}

#[test]
fn theme_defaults_to_light_and_toggles() {
    let home = TempDir::new().expect("home");
    formwork_cmd(home.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout("light\n");

    formwork_cmd(home.path())
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(contains("Theme is now dark"));

    formwork_cmd(home.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout("dark\n");

    assert!(home.path().join(".formwork").join("storage.json").exists());
}

#[test]
fn theme_set_rejects_unknown_value() {
    let home = TempDir::new().expect("home");
    formwork_cmd(home.path())
        .args(["theme", "set", "sepia"])
        .assert()
        .failure()
        .stderr(contains("unknown theme"));
}

#[test]
fn todo_lifecycle() {
    let home = TempDir::new().expect("home");
    formwork_cmd(home.path())
        .args(["todo", "add", "buy", "milk"])
        .assert()
        .success()
        .stdout(contains("Added #1"));
    formwork_cmd(home.path())
        .args(["todo", "add", "walk the dog"])
        .assert()
        .success()
        .stdout(contains("Added #2"));

    formwork_cmd(home.path())
        .args(["todo", "done", "1"])
        .assert()
        .success()
        .stdout(contains("#1 marked done"));

    formwork_cmd(home.path())
        .args(["todo", "list"])
        .assert()
        .success()
        .stdout(contains("buy milk"))
        .stdout(contains("1 item(s) left"));

    formwork_cmd(home.path())
        .args(["todo", "clear"])
        .assert()
        .success()
        .stdout(contains("Cleared 1 finished item(s)"));

    let output = formwork_cmd(home.path())
        .args(["todo", "list", "--json"])
        .output()
        .expect("run list");
    assert!(output.status.success());
    let items: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let items = items.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "walk the dog");
}

#[test]
fn todo_rejects_blank_and_unknown_ids() {
    let home = TempDir::new().expect("home");
    formwork_cmd(home.path())
        .args(["todo", "add", "   "])
        .assert()
        .failure()
        .stderr(contains("must not be blank"));
    formwork_cmd(home.path())
        .args(["todo", "remove", "42"])
        .assert()
        .failure()
        .stderr(contains("no to-do with id 42"));
    formwork_cmd(home.path())
        .args(["todo", "list"])
        .assert()
        .success()
        .stdout(contains("Nothing to do."));
}

#[test]
fn debug_log_goes_to_stderr_only() {
    let home = TempDir::new().expect("home");
    formwork_cmd(home.path())
        .env("RUST_LOG", "formwork=debug")
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout("light\n")
        .stderr(contains("dispatching").and(contains("opening store")));
}

#[test]
fn default_log_level_is_quiet() {
    let home = TempDir::new().expect("home");
    formwork_cmd(home.path())
        .args(["theme", "show"])
        .assert()
        .success()
        .stderr("");
}
