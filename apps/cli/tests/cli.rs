use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn toggle(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("toggle").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("RUST_LOG")
        .env("TOGGLE__STORE__DATA_DIR", workdir.path().join("data"))
        .env("TOGGLE__LOG__LEVEL", "warn");
    cmd
}

fn run_json(workdir: &TempDir, args: &[&str]) -> Value {
    let output = toggle(workdir).args(args).assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn add_then_get_round_trips() {
    let dir = TempDir::new().unwrap();
    run_json(
        &dir,
        &["add", "wibble", "feat", "--enabled", "-u", "admin", "-u", "editor", "--pattern", ".*admin.*"],
    );

    let feature = run_json(&dir, &["get", "wibble", "feat"]);
    assert_eq!(feature["enabled"], true);
    assert_eq!(feature["user_groups"], json!({ "list": ["admin", "editor"], "regex": ".*admin.*" }));
    assert!(dir.path().join("data/catalog.json").is_file());
}

#[test]
fn add_group_is_idempotent() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_json(&dir, &["add-group", "burgers"])["created"], true);
    assert_eq!(run_json(&dir, &["add-group", "burgers"])["created"], false);
    assert_eq!(run_json(&dir, &["groups"]), json!(["burgers"]));
}

#[test]
fn active_honours_requester_groups() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["add", "g", "beta", "--enabled", "-u", "admin"]);

    assert_eq!(run_json(&dir, &["active", "g", "beta", "--as", "admin"]), json!(true));
    assert_eq!(run_json(&dir, &["active", "g", "beta", "--as", "editor"]), json!(false));
    assert_eq!(run_json(&dir, &["active", "g", "beta"]), json!(false));

    let explained = run_json(&dir, &["active", "g", "beta", "--as", "admin", "--explain"]);
    assert_eq!(explained["explanation"]["reason"], "list_match");
}

#[test]
fn import_applies_a_batch_in_order() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("specs.json");
    fs::write(
        &file,
        r#"[
            { "group": "group_name", "name": "feature1", "active": true },
            { "group": "group_name", "name": "feature2" },
            { "group": "something_else", "name": "wibble" }
        ]"#,
    )
    .unwrap();

    let imported = run_json(&dir, &["import", file.to_str().unwrap()]);
    assert_eq!(imported.as_array().unwrap().len(), 3);

    let features = run_json(&dir, &["features", "group_name"]);
    let names: Vec<_> = features.as_array().unwrap().iter().map(|f| f["name"].clone()).collect();
    assert_eq!(names, [json!("feature1"), json!("feature2")]);
    assert_eq!(features[0]["enabled"], true);
}

#[test]
fn update_renames_and_switches() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["add", "group", "feat", "-u", "admin"]);

    let updated =
        run_json(&dir, &["update", "group", "feat", "--rename", "updated", "--enabled", "true", "--clear-user-groups"]);
    assert_eq!(updated["name"], "updated");
    assert_eq!(updated["enabled"], true);
    assert!(updated.get("user_groups").is_none());

    toggle(&dir)
        .args(["get", "group", "feat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Feature not found"));
}

#[test]
fn update_without_attributes_fails() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["add", "group", "feat"]);
    toggle(&dir)
        .args(["update", "group", "feat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn remove_reports_missing_group_first() {
    let dir = TempDir::new().unwrap();
    toggle(&dir)
        .args(["remove", "burgers", "foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Group not found"));

    run_json(&dir, &["add", "burgers", "foo"]);
    let removed = run_json(&dir, &["remove", "burgers", "foo"]);
    assert_eq!(removed["name"], "foo");
    assert_eq!(run_json(&dir, &["groups"]), json!(["burgers"]));
}

#[test]
fn invalid_pattern_is_rejected() {
    let dir = TempDir::new().unwrap();
    toggle(&dir)
        .args(["add", "g", "f", "--pattern", "(unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid user-group pattern"));
}

#[test]
fn states_resolve_every_feature() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["add", "a", "open", "--enabled"]);
    run_json(&dir, &["add", "b", "gated", "--enabled", "-p", "^ops"]);

    let states = run_json(&dir, &["states", "--as", "ops-team"]);
    assert_eq!(
        states,
        json!([
            { "group": "a", "name": "open", "active": true },
            { "group": "b", "name": "gated", "active": true }
        ])
    );

    let states = run_json(&dir, &["states", "b"]);
    assert_eq!(states, json!([{ "group": "b", "name": "gated", "active": false }]));
}

#[test]
fn explicit_config_file_must_exist() {
    let dir = TempDir::new().unwrap();
    toggle(&dir)
        .args(["--config", "absent.toml", "groups"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration is malformed"));
}

#[test]
fn memory_backend_from_config_file_keeps_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("toggle.toml"), "[store]\nbackend = \"memory\"\n").unwrap();

    run_json(&dir, &["add-group", "ephemeral"]);
    assert_eq!(run_json(&dir, &["groups"]), json!([]));
    assert!(!dir.path().join("data").exists());
}
