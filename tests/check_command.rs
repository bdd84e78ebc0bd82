//! Integration tests for the non-interactive --check flag

use std::path::Path;
use std::process::Command;

fn run_check(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_modeterm"))
        // Tests must not depend on a user's ~/.config/modeterm/modeterm.toml.
        .arg("--no-user-config")
        .arg("--check")
        .args(args)
        .env_remove("MODETERM_LOG")
        .output()
        .expect("Failed to execute modeterm");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn write_config(dir: &Path, content: &str) -> String {
    let path = dir.join("modeterm.toml");
    std::fs::write(&path, content).expect("write config");
    path.display().to_string()
}

#[test]
fn test_default_overlay() {
    let (stdout, stderr, code) = run_check(&[]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Enter -> terminal-send-return");
    assert_eq!(lines[1], "C-c -> terminal-interrupt");
    assert!(lines.contains(&"u -> terminal-undo"));
    assert!(lines.contains(&"D -> terminal-kill-line"));
    assert!(lines.contains(&"p -> terminal-yank"));
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_policy_flag() {
    let (stdout, _, code) = run_check(&["--policy", "sync-before-delegate"]);
    assert_eq!(code, 0);
    assert!(stdout.lines().any(|line| line == "h -> sync+left"));
    assert!(stdout.lines().any(|line| line == "Left -> sync+left"));
    assert!(stdout.lines().any(|line| line == "u -> terminal-undo"));
}

#[test]
fn test_unknown_policy_flag() {
    let (_, stderr, code) = run_check(&["--policy", "eager"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown policy: eager"));
}

#[test]
fn test_sync_entries_from_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
[integration]
sync = ["word-forward"]

[remap]
undo = "terminal-undo"
"#,
    );
    let (stdout, stderr, code) = run_check(&["--config", &path]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.lines().any(|line| line == "w -> sync+word-forward"));
    assert!(stdout.lines().any(|line| line == "u -> terminal-undo"));
    assert!(!stdout.contains("terminal-kill-line"));
}

#[test]
fn test_custom_terminal_command() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
[remap]
line-start = "terminal-beginning-of-line"

[terminal.commands]
terminal-beginning-of-line = ["C-a"]
"#,
    );
    let (stdout, stderr, code) = run_check(&["--config", &path]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.lines().any(|line| line == "0 -> terminal-beginning-of-line"));
    assert!(stdout.lines().any(|line| line == "Home -> terminal-beginning-of-line"));
}

#[test]
fn test_unknown_replacement_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[remap]\nleft = \"terminal-teleport\"\n");
    let (stdout, stderr, code) = run_check(&["--config", &path]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("invalid remap entry 'left -> terminal-teleport'"));
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(dir.path(), "[remap\n");
    let (stdout, stderr, code) = run_check(&["--config", &path]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Warning:"));
    assert!(stdout.lines().any(|line| line == "u -> terminal-undo"));
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run_check(&["--frobnicate"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option: --frobnicate"));
}
