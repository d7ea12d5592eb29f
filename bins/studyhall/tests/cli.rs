//! End-to-end tests for the studyhall binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let prefs = dir.path().join("prefs.json");
        let config = format!(
            "[preferences]\npath = {:?}\nmax_recent_searches = 3\n",
            prefs.display().to_string()
        );
        fs::write(dir.path().join("studyhall.toml"), config).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn prefs_path(&self) -> PathBuf {
        self.dir.path().join("prefs.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("studyhall").unwrap();
        cmd.current_dir(self.path())
            .env_remove("STUDYHALL_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--no-color")
            .arg("--config")
            .arg(self.path().join("studyhall.toml"));
        cmd
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.cmd().args(["--format", "json"]).args(args).output().unwrap();
        assert!(output.status.success(), "{args:?} failed: {output:?}");
        serde_json::from_slice(&output.stdout).unwrap()
    }

    fn stored(&self) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(self.prefs_path()).unwrap()).unwrap()
    }
}

#[test]
fn test_help() {
    Command::cargo_bin("studyhall")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("progress"));
}

#[test]
fn test_list_groups_by_level() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 1: Fundamentals"))
        .stdout(predicate::str::contains("launched_effect"));
}

#[test]
fn test_list_by_category() {
    let sandbox = Sandbox::new();
    let modules = sandbox.json(&["list", "--category", "side-effects"]);
    let modules = modules.as_array().unwrap();
    assert!(!modules.is_empty());
    assert!(modules.iter().all(|m| m["category"] == "effects"));
}

#[test]
fn test_list_rejects_unknown_category() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["list", "--category", "cooking"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn test_search_records_query() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["search", "Button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("button"));

    let recent = sandbox.json(&["recent"]);
    assert_eq!(recent["recent_searches"], serde_json::json!(["Button"]));
    assert_eq!(sandbox.stored()["recent_searches"], "Button");
}

#[test]
fn test_search_no_record() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["search", "--no-record", "button"]).assert().success();

    let recent = sandbox.json(&["recent"]);
    assert_eq!(recent["recent_searches"], serde_json::json!([]));
}

#[test]
fn test_search_without_matches() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["search", "zzzz-nothing"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No modules match"));
}

#[test]
fn test_recent_searches_capped_by_config() {
    let sandbox = Sandbox::new();
    for term in ["one", "two", "three", "four"] {
        sandbox.cmd().args(["search", term]).assert().success();
    }

    let recent = sandbox.json(&["recent"]);
    assert_eq!(
        recent["recent_searches"],
        serde_json::json!(["four", "three", "two"])
    );
}

#[test]
fn test_forget_and_clear_searches() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["search", "state"]).assert().success();
    sandbox.cmd().args(["search", "list"]).assert().success();

    sandbox
        .cmd()
        .args(["forget", "state"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Forgot 'state'"));
    let recent = sandbox.json(&["recent"]);
    assert_eq!(recent["recent_searches"], serde_json::json!(["list"]));

    let cleared = sandbox.json(&["recent", "--clear-searches"]);
    assert_eq!(cleared["recent_searches"], serde_json::json!([]));
}

#[test]
fn test_show_module() {
    let sandbox = Sandbox::new();
    let detail = sandbox.json(&["show", "launched_effect"]);
    assert_eq!(detail["id"], "launched_effect");
    assert_eq!(detail["level"], 7);
    assert_eq!(detail["completed"], false);
}

#[test]
fn test_show_unknown_module_exit_code() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["show", "no_such_module"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("no_such_module"));
}

#[test]
fn test_open_tracks_recent_modules() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["open", "button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("study/button"));
    sandbox.cmd().args(["open", "launched_effect"]).assert().success();
    sandbox.cmd().args(["open", "button"]).assert().success();

    let recent = sandbox.json(&["recent"]);
    assert_eq!(
        recent["recent_modules"],
        serde_json::json!(["button", "launched_effect"])
    );
    assert_eq!(sandbox.stored()["recent_modules"], "button|launched_effect");
}

#[test]
fn test_open_unknown_records_nothing() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["open", "missing"]).assert().code(6);
    assert!(!sandbox.prefs_path().exists());
}

#[test]
fn test_complete_and_progress() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["complete", "button"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked complete"));

    let progress = sandbox.json(&["progress"]);
    assert_eq!(progress["completed"], 1);

    sandbox.cmd().args(["complete", "--undo", "button"]).assert().success();
    let progress = sandbox.json(&["progress"]);
    assert_eq!(progress["completed"], 0);
}

#[test]
fn test_toggle_twice_restores() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["toggle", "button"]).assert().success();
    assert_eq!(sandbox.json(&["show", "button"])["completed"], true);

    sandbox.cmd().args(["toggle", "button"]).assert().success();
    assert_eq!(sandbox.json(&["show", "button"])["completed"], false);
}

#[test]
fn test_progress_reset() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["complete", "button"]).assert().success();
    sandbox.cmd().args(["complete", "launched_effect"]).assert().success();

    sandbox
        .cmd()
        .args(["progress", "--reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress reset"));
    assert_eq!(sandbox.json(&["progress"])["completed"], 0);
}

#[test]
fn test_expand_and_collapse_levels() {
    let sandbox = Sandbox::new();
    let expanded = sandbox.json(&["expand", "3"]);
    assert_eq!(expanded["expanded_levels"], serde_json::json!([3]));
    assert_eq!(sandbox.stored()["expanded_levels"], "3");

    let all = sandbox.json(&["expand", "--all"]);
    assert_eq!(all["expanded_levels"].as_array().unwrap().len(), 10);

    let collapsed = sandbox.json(&["collapse", "--all"]);
    assert_eq!(collapsed["expanded_levels"], serde_json::json!([]));
}

#[test]
fn test_stats() {
    let sandbox = Sandbox::new();
    let stats = sandbox.json(&["stats"]);
    let total = stats["total"].as_u64().unwrap();
    let by_level: u64 = stats["by_level"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert!(total > 0);
    assert_eq!(total, by_level);
}

#[test]
fn test_check_builtin_catalog() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("All prerequisites resolve"));
}

fn write_catalog_with_dangling(sandbox: &Sandbox, validate: bool) {
    let catalog = sandbox.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"[
            {"id": "basics", "name": "Basics", "description": "Start here",
             "level": 1, "category": "fundamentals", "launch_target": "study/basics"},
            {"id": "next", "name": "Next", "description": "Then this",
             "level": 2, "category": "layout", "prerequisites": ["ghost"],
             "launch_target": "study/next"}
        ]"#,
    )
    .unwrap();
    let config = format!(
        "[preferences]\npath = {:?}\n\n[catalog]\npath = {:?}\nvalidate_prerequisites = {validate}\n",
        sandbox.prefs_path().display().to_string(),
        catalog.display().to_string(),
    );
    fs::write(sandbox.path().join("studyhall.toml"), config).unwrap();
}

#[test]
fn test_dangling_prerequisite_is_lenient_by_default() {
    let sandbox = Sandbox::new();
    write_catalog_with_dangling(&sandbox, false);

    let stats = sandbox.json(&["stats"]);
    assert_eq!(stats["total"], 2);

    sandbox
        .cmd()
        .arg("check")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_dangling_prerequisite_strict_mode() {
    let sandbox = Sandbox::new();
    write_catalog_with_dangling(&sandbox, true);

    sandbox.cmd().arg("stats").assert().code(4);
}

#[test]
fn test_missing_config_file() {
    let sandbox = Sandbox::new();
    Command::cargo_bin("studyhall")
        .unwrap()
        .current_dir(sandbox.path())
        .args(["--config", "does-not-exist.toml", "stats"])
        .assert()
        .code(3);
}

#[test]
fn test_corrupt_preferences_fall_back_to_defaults() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.prefs_path(), "{ not json").unwrap();

    let recent = sandbox.json(&["recent"]);
    assert_eq!(recent["recent_searches"], serde_json::json!([]));
}

#[test]
fn test_completion_commands_emit_only_json() {
    let sandbox = Sandbox::new();

    let done = sandbox.json(&["complete", "button"]);
    assert_eq!(done, serde_json::json!({ "id": "button", "completed": true }));

    let undone = sandbox.json(&["complete", "--undo", "button"]);
    assert_eq!(undone["completed"], false);

    let toggled = sandbox.json(&["toggle", "button"]);
    assert_eq!(toggled, serde_json::json!({ "id": "button", "completed": true }));
}

#[test]
fn test_forget_emits_only_json() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["search", "state"]).assert().success();

    let forgot = sandbox.json(&["forget", "state"]);
    assert_eq!(forgot, serde_json::json!({ "term": "state", "forgot": true }));

    let again = sandbox.json(&["forget", "state"]);
    assert_eq!(again["forgot"], false);
}

#[test]
fn test_progress_reset_emits_only_json() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["complete", "button"]).assert().success();

    let progress = sandbox.json(&["progress", "--reset"]);
    assert_eq!(progress["completed"], 0);
    assert!(progress["levels"].is_array());
}

#[test]
fn test_search_with_surrounding_spaces() {
    let sandbox = Sandbox::new();
    let sections = sandbox.json(&["search", "--no-record", "  button "]);
    let ids: Vec<&str> = sections
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|s| s["modules"].as_array().unwrap())
        .filter_map(|m| m["id"].as_str())
        .collect();
    assert!(ids.contains(&"button"));
}
