//! Integration tests for the `queuescope` CLI binary.
//!
//! Snapshots are written to temp files; no test reads the user's config.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `queuescope` binary with env isolation.
fn queuescope_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("queuescope");
    cmd.env("HOME", "/tmp/queuescope-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/queuescope-cli-test-nonexistent")
        .env_remove("QUEUESCOPE_CONFIG")
        .env_remove("QUEUESCOPE_OUTPUT")
        .env_remove("QUEUESCOPE_DEFAULTS__QUEUES_FILE")
        .env_remove("QUEUESCOPE_DEFAULTS__METRICS_FILE")
        .env_remove("QUEUESCOPE_DEFAULTS__CANVAS_WIDTH")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

const QUEUES: &str = r#"[
  {"name": "root", "children": ["a", "b"], "capacity": 100, "maxCapacity": 100, "usedCapacity": 40},
  {"name": "a", "parent": "root", "children": ["a1"], "capacity": 60, "maxCapacity": 80, "usedCapacity": 50, "absUsedCapacity": 30},
  {"name": "a1", "parent": "a", "capacity": 100, "maxCapacity": 100, "usedCapacity": 50, "absUsedCapacity": 30},
  {"name": "b", "parent": "root", "capacity": 40, "maxCapacity": 100, "usedCapacity": 25, "absUsedCapacity": 10}
]"#;

const SCHEDULER: &str = r#"{"scheduler": {"schedulerInfo": {
  "type": "capacityScheduler", "capacity": 100, "usedCapacity": 5, "maxCapacity": 100,
  "queueName": "root",
  "queues": {"queue": [
    {"queueName": "default", "capacity": 70, "absoluteUsedCapacity": 4},
    {"queueName": "batch", "capacity": 30, "absoluteUsedCapacity": 1}
  ]}
}}}"#;

const METRICS: &str = r#"{"clusterMetrics": {
  "appsSubmitted": 12, "appsCompleted": 8, "appsPending": 1, "appsRunning": 2,
  "appsFailed": 1, "appsKilled": 0,
  "reservedMB": 0, "availableMB": 6144, "allocatedMB": 2048, "totalMB": 8192,
  "reservedVirtualCores": 0, "availableVirtualCores": 6, "allocatedVirtualCores": 2,
  "totalVirtualCores": 8, "totalNodes": 3, "activeNodes": 2, "decommissionedNodes": 1
}}"#;

fn fixture(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn stdout_of(cmd: &mut assert_cmd::Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed:\n{}", combined_output(&output));
    String::from_utf8(output.stdout).unwrap()
}

fn with_input(cmd: &mut assert_cmd::Command, path: &Path) {
    cmd.arg("--input").arg(path);
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = queuescope_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    queuescope_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("queues")
            .and(predicate::str::contains("cluster"))
            .and(predicate::str::contains("config")),
    );
}

// ── Queues ──────────────────────────────────────────────────────────

#[test]
fn test_queues_list_plain() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "list", "-o", "plain"]);
    with_input(&mut cmd, &input);
    assert_eq!(stdout_of(&mut cmd), "root\na\na1\nb\n");
}

#[test]
fn test_queues_list_reads_scheduler_payload() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "scheduler.json", SCHEDULER);
    let mut cmd = queuescope_cmd();
    cmd.args(["q", "ls", "-o", "plain"]);
    with_input(&mut cmd, &input);
    assert_eq!(stdout_of(&mut cmd), "root\ndefault\nbatch\n");
}

#[test]
fn test_queues_list_table() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "list"]);
    with_input(&mut cmd, &input);
    let out = stdout_of(&mut cmd);
    assert!(out.contains("Name"));
    assert!(out.contains("60.0%"));
}

#[test]
fn test_queues_layout_json_positions() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "layout", "-o", "json"]);
    with_input(&mut cmd, &input);
    let nodes: serde_json::Value = serde_json::from_str(&stdout_of(&mut cmd)).unwrap();
    let b = nodes.as_array().unwrap().iter().find(|n| n["name"] == "b").unwrap();
    assert_eq!(b["position"]["x"], 50.0);
    assert_eq!(b["position"]["y"], 110.0);
    assert_eq!(b["depth"], 1);
}

#[test]
fn test_queues_layout_fold_hides_descendants() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "layout", "-o", "plain", "--fold", "a"]);
    with_input(&mut cmd, &input);
    assert_eq!(stdout_of(&mut cmd), "root\na\nb\n");
}

#[test]
fn test_queues_charts_follow_selection() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);

    let mut root = queuescope_cmd();
    root.args(["queues", "charts", "-o", "plain"]);
    with_input(&mut root, &input);
    assert_eq!(
        stdout_of(&mut root),
        "LeafQueues Used Capacities\nChildren Capacities\nChildren Used Capacities\n"
    );

    let mut parent = queuescope_cmd();
    parent.args(["queues", "charts", "-o", "plain", "--select", "a"]);
    with_input(&mut parent, &input);
    assert_eq!(
        stdout_of(&mut parent),
        "Queue Capacities\nChildren Capacities\nChildren Used Capacities\n"
    );

    let mut leaf = queuescope_cmd();
    leaf.args(["queues", "charts", "-o", "plain", "-s", "a1"]);
    with_input(&mut leaf, &input);
    assert_eq!(stdout_of(&mut leaf), "Queue Capacities\n");
}

#[test]
fn test_queues_render_svg_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "render", "--no-animate", "--select", "b"]);
    with_input(&mut cmd, &input);
    let svg = stdout_of(&mut cmd);
    assert!(svg.starts_with("<svg "));
    assert!(svg.contains("Queue Capacities"));
    assert!(!svg.contains("<animate"));
}

#[test]
fn test_queues_render_writes_file() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let out = dir.path().join("dash.svg");
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "render", "--color", "never", "--out"]).arg(&out);
    with_input(&mut cmd, &input);
    cmd.assert().success().stderr(predicate::str::contains("Wrote"));
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("LeafQueues Used Capacities"));
}

// ── Error handling ──────────────────────────────────────────────────

#[test]
fn test_missing_input_is_usage_error() {
    let output = queuescope_cmd().args(["queues", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--input"));
}

#[test]
fn test_unknown_queue_exits_not_found() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "render", "--select", "nope"]);
    with_input(&mut cmd, &input);
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("nope"));
}

#[test]
fn test_folding_a_leaf_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "layout", "--fold", "b"]);
    with_input(&mut cmd, &input);
    assert_eq!(cmd.output().unwrap().status.code(), Some(2));
}

#[test]
fn test_bad_json_exits_invalid_snapshot() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "broken.json", "{ not json");
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "list"]);
    with_input(&mut cmd, &input);
    assert_eq!(cmd.output().unwrap().status.code(), Some(5));
}

#[test]
fn test_unreadable_input_is_general_error() {
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "list", "--input", "/tmp/queuescope-cli-test-nonexistent/q.json"]);
    assert_eq!(cmd.output().unwrap().status.code(), Some(1));
}

#[test]
fn test_non_positive_width_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let mut cmd = queuescope_cmd();
    cmd.args(["queues", "render", "--width=-5"]);
    with_input(&mut cmd, &input);
    assert_eq!(cmd.output().unwrap().status.code(), Some(2));
}

// ── Cluster ─────────────────────────────────────────────────────────

#[test]
fn test_cluster_render_has_five_charts() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "metrics.json", METRICS);
    let mut cmd = queuescope_cmd();
    cmd.args(["cluster", "render"]);
    with_input(&mut cmd, &input);
    let svg = stdout_of(&mut cmd);
    for title in ["Finished Apps", "Running Apps", "Nodes", "Resource: Memory (MB)", "Resource: VCores"] {
        assert!(svg.contains(title), "missing {title}");
    }
}

#[test]
fn test_cluster_show_json_round_trips_metrics() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "metrics.json", METRICS);
    let mut cmd = queuescope_cmd();
    cmd.args(["cluster", "show", "-o", "json"]);
    with_input(&mut cmd, &input);
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&mut cmd)).unwrap();
    assert_eq!(value["totalMB"], 8192.0);
    assert_eq!(value["activeNodes"], 2.0);
}

#[test]
fn test_cluster_show_plain_lists_series() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "metrics.json", METRICS);
    let mut cmd = queuescope_cmd();
    cmd.args(["cluster", "show", "-o", "plain"]);
    with_input(&mut cmd, &input);
    assert!(stdout_of(&mut cmd).contains("Finished Apps.Completed=8"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    queuescope_cmd()
        .args(["config", "path", "--config", "/tmp/elsewhere.toml"])
        .assert()
        .success()
        .stdout("/tmp/elsewhere.toml\n");
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    queuescope_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success();
    assert!(std::fs::read_to_string(&path).unwrap().contains("canvas_width"));

    let output = queuescope_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    queuescope_cmd()
        .args(["config", "init", "--force", "--config"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_configured_input_is_used() {
    let dir = TempDir::new().unwrap();
    let input = fixture(&dir, "queues.json", QUEUES);
    let config = fixture(
        &dir,
        "config.toml",
        &format!("[defaults]\nqueues_file = {:?}\noutput = \"plain\"\n", input.display().to_string()),
    );
    let out = queuescope_cmd()
        .args(["queues", "list", "--config"])
        .arg(&config)
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", combined_output(&out));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "root\na\na1\nb\n");
}
