#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn amphion(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("amphion").unwrap();
    cmd.current_dir(dir.path())
        .env("AMPHION_ROOT", dir.path())
        .env_remove("AMPHION_DISPATCH_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

const WINDSURF_SNAPSHOT: &str = r#"
app_name: Windsurf
commands:
  - windsurf.openProfile
  - windsurf.triggerCascade
  - windsurf.prioritized.command.open
  - windsurf.openBillingPage
open_commands:
  - windsurf.triggerCascade
"#;

const VSCODE_PREFILL_SNAPSHOT: &str = r#"{
  "app_name": "Visual Studio Code",
  "commands": ["workbench.action.chat.open", "chat.focus"],
  "prefill": { "workbench.action.chat.open": ["prompt-object"] }
}"#;

// ---------------------------------------------------------------------------
// amphion detect
// ---------------------------------------------------------------------------

#[test]
fn detect_prints_provider() {
    let dir = TempDir::new().unwrap();
    amphion(&dir)
        .args(["detect", "Cursor Nightly"])
        .assert()
        .success()
        .stdout("cursor\n");
    amphion(&dir)
        .args(["detect", ""])
        .assert()
        .success()
        .stdout("generic\n");
}

#[test]
fn detect_json() {
    let dir = TempDir::new().unwrap();
    let out = amphion(&dir)
        .args(["--json", "detect", "Visual Studio Code"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["provider"], "vscode");
}

// ---------------------------------------------------------------------------
// amphion catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_lists_provider_commands() {
    let dir = TempDir::new().unwrap();
    amphion(&dir)
        .args(["catalog", "--provider", "windsurf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("windsurf.triggerCascade"))
        .stdout(predicate::str::contains("generic commands are appended"));
}

#[test]
fn catalog_rejects_unknown_provider() {
    let dir = TempDir::new().unwrap();
    amphion(&dir)
        .args(["catalog", "--provider", "zed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown provider 'zed'"));
}

// ---------------------------------------------------------------------------
// amphion plan
// ---------------------------------------------------------------------------

#[test]
fn plan_is_dry_run() {
    let dir = TempDir::new().unwrap();
    let snap = write(&dir, "windsurf.yaml", WINDSURF_SNAPSHOT);
    let out = amphion(&dir)
        .args(["--json", "plan", "--text", "hello", "--snapshot"])
        .arg(&snap)
        .output()
        .unwrap();
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["provider"], "windsurf");
    assert_eq!(value["mode"], "dry-run");
    assert_eq!(value["attempts"].as_array().unwrap().len(), 0);
    let resolved: Vec<&str> = value["resolvedCommands"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        resolved,
        vec!["windsurf.triggerCascade", "windsurf.prioritized.command.open"]
    );
    assert_eq!(value["failureReason"], "no-attempts-executed");
}

#[test]
fn plan_table_shows_sources() {
    let dir = TempDir::new().unwrap();
    let snap = write(&dir, "windsurf.yaml", WINDSURF_SNAPSHOT);
    write(
        &dir,
        ".amphion/chat-dispatch.yaml",
        "overrides:\n  windsurf_commands: [windsurf.openBillingPage]\n",
    );
    amphion(&dir)
        .args(["plan", "--snapshot"])
        .arg(&snap)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"1\s+windsurf\.openBillingPage\s+override").unwrap())
        .stdout(predicate::str::contains("provider:   windsurf"));
}

#[test]
fn plan_missing_snapshot_fails() {
    let dir = TempDir::new().unwrap();
    amphion(&dir)
        .args(["plan", "--snapshot", "nope.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("snapshot not found"));
}

// ---------------------------------------------------------------------------
// amphion simulate
// ---------------------------------------------------------------------------

#[test]
fn simulate_open_and_type() {
    let dir = TempDir::new().unwrap();
    let snap = write(&dir, "windsurf.yaml", WINDSURF_SNAPSHOT);
    amphion(&dir)
        .args(["simulate", "--text", "ship it", "--snapshot"])
        .arg(&snap)
        .assert()
        .success()
        .stdout(predicate::str::contains("Delivered via windsurf.triggerCascade"));
}

#[test]
fn simulate_prefill_json() {
    let dir = TempDir::new().unwrap();
    let snap = write(&dir, "vscode.json", VSCODE_PREFILL_SNAPSHOT);
    let out = amphion(&dir)
        .args(["--json", "simulate", "--text", "ship it", "--snapshot"])
        .arg(&snap)
        .output()
        .unwrap();
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["ok"], true);
    let diagnostics = &value["diagnostics"];
    assert_eq!(diagnostics["successCommand"], "workbench.action.chat.open");
    let attempts = diagnostics["attempts"].as_array().unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[1]["payloadKind"], "prompt-object");
    assert_eq!(attempts[1]["ok"], true);
}

#[test]
fn simulate_failure_exits_nonzero_with_reason() {
    let dir = TempDir::new().unwrap();
    let snap = write(
        &dir,
        "broken.yaml",
        "app_name: Windsurf\ncommands: [windsurf.triggerCascade]\nopen_commands: [windsurf.triggerCascade]\ntype_succeeds: false\n",
    );
    amphion(&dir)
        .args(["simulate", "--text", "hi", "--snapshot"])
        .arg(&snap)
        .assert()
        .failure()
        .stderr(predicate::str::contains("chat-opened-but-type-failed"));
}

#[test]
fn simulate_empty_text_fails() {
    let dir = TempDir::new().unwrap();
    let snap = write(&dir, "windsurf.yaml", WINDSURF_SNAPSHOT);
    amphion(&dir)
        .args(["simulate", "--text", "   ", "--snapshot"])
        .arg(&snap)
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty-input"));
}

#[test]
fn simulate_writes_diagnostics_log_when_enabled() {
    let dir = TempDir::new().unwrap();
    let snap = write(&dir, "windsurf.yaml", WINDSURF_SNAPSHOT);
    write(
        &dir,
        ".amphion/chat-dispatch.yaml",
        "enable_diagnostics_logging: true\nopen_delay_ms: 30\n",
    );
    amphion(&dir)
        .args(["simulate", "--text", "hi", "--snapshot"])
        .arg(&snap)
        .assert()
        .success();

    let log = std::fs::read_to_string(dir.path().join(".amphion/logs/chat-dispatch.log")).unwrap();
    assert!(log.contains("app=Windsurf provider=windsurf"));
    assert!(log.contains("\"successCommand\": \"windsurf.triggerCascade\""));
}

#[test]
fn simulate_without_logging_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let snap = write(&dir, "windsurf.yaml", WINDSURF_SNAPSHOT);
    amphion(&dir)
        .args(["simulate", "--text", "hi", "--snapshot"])
        .arg(&snap)
        .assert()
        .success();
    assert!(!dir.path().join(".amphion/logs").exists());
}

// ---------------------------------------------------------------------------
// amphion config
// ---------------------------------------------------------------------------

#[test]
fn config_init_then_show() {
    let dir = TempDir::new().unwrap();
    amphion(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join(".amphion/chat-dispatch.yaml").exists());

    amphion(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config already exists"));

    amphion(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("open delay:      120ms"));
}

#[test]
fn config_show_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    amphion(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, using defaults"));
}

#[test]
fn config_explicit_path() {
    let dir = TempDir::new().unwrap();
    let cfg = write(&dir, "custom.yaml", "open_delay_ms: 9000\n");
    let out = amphion(&dir)
        .args(["--json", "config", "show", "--config"])
        .arg(&cfg)
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["open_delay_ms"], 1500);
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        ".amphion/chat-dispatch.yaml",
        "open_delay_ms: 5\nattempt_timeout_ms: 0\n",
    );
    amphion(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[warning] open_delay_ms=5"))
        .stdout(predicate::str::contains("[error] attempt_timeout_ms=0"));
}

#[test]
fn config_validate_clean() {
    let dir = TempDir::new().unwrap();
    amphion(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));
}

#[test]
fn config_validate_warns_on_dropped_overrides() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        ".amphion/chat-dispatch.yaml",
        "overrides:\n  windsurf_commands: [a.b, 42, a.b]\n",
    );
    amphion(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[warning] override 42 for windsurf ignored: not a string",
        ))
        .stdout(predicate::str::contains("ignored: duplicate"));
}
