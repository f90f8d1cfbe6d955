//! Integration tests for the `ddash` subcommands that do not need a
//! terminal.
//!
//! Every test points `XDG_CONFIG_HOME` and `XDG_STATE_HOME` at a fresh
//! temporary directory so the user's real files are never touched.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DDASH_BIN: &str = env!("CARGO_BIN_EXE_ddash");

const DEFAULT_IDS: [&str; 8] = [
    "device",
    "display",
    "performance",
    "battery",
    "network",
    "storage",
    "location",
    "permissions",
];

/// A sandboxed home for one test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn config_home(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    fn state_home(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    fn layout_file(&self) -> PathBuf {
        self.state_home()
            .join("device-dashboard")
            .join("widget-order.json")
    }

    fn config_file(&self) -> PathBuf {
        self.config_home()
            .join("device-dashboard")
            .join("config.toml")
    }

    fn write_layout(&self, content: &str) {
        let path = self.layout_file();
        fs::create_dir_all(path.parent().expect("has parent")).expect("create state dir");
        fs::write(path, content).expect("write layout");
    }

    /// Writes a config that keeps `snapshot` off the network and battery.
    fn write_quiet_config(&self) -> PathBuf {
        let path = self.dir.path().join("quiet.toml");
        fs::write(
            &path,
            "[signals]\nbattery = false\nnetwork = false\n\n[location]\nenabled = false\n",
        )
        .expect("write config");
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(DDASH_BIN);
        cmd.env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_STATE_HOME", self.state_home())
            .env_remove("DDASH_LOG");
        cmd
    }
}

fn listed_ids(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| line.split('\t').next())
        .map(str::to_string)
        .collect()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("valid utf8 path")
}

#[test]
fn test_layout_path_follows_xdg_state_home() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["layout", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path_str(&sandbox.layout_file())));
}

#[test]
fn test_layout_show_defaults_without_saved_order() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["layout", "show"])
        .output()
        .expect("run layout show");
    assert!(output.status.success());
    assert_eq!(listed_ids(&output.stdout), DEFAULT_IDS);
}

#[test]
fn test_layout_show_returns_saved_order_verbatim() {
    let sandbox = Sandbox::new();
    sandbox.write_layout(r#"["network","device","clock"]"#);
    let output = sandbox
        .cmd()
        .args(["layout", "show"])
        .output()
        .expect("run layout show");
    assert!(output.status.success());
    assert_eq!(listed_ids(&output.stdout), ["network", "device", "clock"]);
}

#[test]
fn test_layout_show_marks_disabled_widgets() {
    let sandbox = Sandbox::new();
    sandbox.write_layout(r#"["device",{"id":"battery","enabled":false}]"#);
    sandbox
        .cmd()
        .args(["layout", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("battery\tBattery\t(disabled)"));
}

#[test]
fn test_layout_show_falls_back_on_corrupt_file() {
    let sandbox = Sandbox::new();
    sandbox.write_layout("{not json");
    let output = sandbox
        .cmd()
        .args(["layout", "show"])
        .output()
        .expect("run layout show");
    assert!(output.status.success());
    assert_eq!(listed_ids(&output.stdout), DEFAULT_IDS);
}

#[test]
fn test_layout_reset_removes_saved_order() {
    let sandbox = Sandbox::new();
    sandbox.write_layout(r#"["storage"]"#);
    sandbox
        .cmd()
        .args(["layout", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    assert!(!sandbox.layout_file().exists());

    sandbox
        .cmd()
        .args(["layout", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults already apply"));
}

#[test]
fn test_layout_file_from_config() {
    let sandbox = Sandbox::new();
    let custom = sandbox.dir.path().join("custom-order.json");
    let config = sandbox.dir.path().join("layout.toml");
    fs::write(
        &config,
        format!("[layout]\nfile = {:?}\n", path_str(&custom)),
    )
    .expect("write config");

    sandbox
        .cmd()
        .args(["--config", path_str(&config), "layout", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path_str(&custom)));
}

#[test]
fn test_config_init_then_validate() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration"));
    assert!(sandbox.config_file().exists());

    sandbox
        .cmd()
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["config", "init"]).assert().success();
    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sandbox
        .cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success();
    assert!(sandbox.config_file().with_extension("toml.backup").exists());
}

#[test]
fn test_config_validate_reports_position() {
    let sandbox = Sandbox::new();
    let config = sandbox.dir.path().join("broken.toml");
    fs::write(&config, "[tui]\ntick_rate = \n").expect("write config");
    sandbox
        .cmd()
        .args(["--config", path_str(&config), "config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml:2:"));
}

#[test]
fn test_config_validate_rejects_bad_duration() {
    let sandbox = Sandbox::new();
    let config = sandbox.dir.path().join("bad.toml");
    fs::write(&config, "[signals]\nnetwork_poll_interval = \"soon\"\n").expect("write config");
    sandbox
        .cmd()
        .args(["--config", path_str(&config), "config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("signals.network_poll_interval"));
}

#[test]
fn test_config_path_honours_flag() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["--config", "/tmp/elsewhere.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/elsewhere.toml"));
}

#[test]
fn test_snapshot_json_has_every_reading() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_quiet_config();
    let output = sandbox
        .cmd()
        .args(["--config", path_str(&config), "snapshot", "--json"])
        .output()
        .expect("run snapshot");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("snapshot should be valid JSON");
    for key in ["platform", "battery_level", "effective_type", "rtt", "disk_total"] {
        assert!(value.get(key).is_some(), "missing key {key}");
    }
    assert!(value["battery_level"].is_null());
    assert!(value["rtt"].is_null());
    assert!(value["max_touch_points"].is_null());
}

#[test]
fn test_snapshot_prints_every_card() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_quiet_config();
    sandbox
        .cmd()
        .args(["--config", path_str(&config), "snapshot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("── Device ──"))
        .stdout(predicate::str::contains("── Permissions ──"))
        .stdout(predicate::str::contains("Location access required"))
        .stdout(predicate::str::contains("Discharging"));
}

#[test]
fn test_snapshot_with_missing_config_fails() {
    let sandbox = Sandbox::new();
    let missing = sandbox.dir.path().join("missing.toml");
    sandbox
        .cmd()
        .args(["--config", path_str(&missing), "snapshot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
