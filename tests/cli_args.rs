//! Tests for the `tilt-flags` binary.

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn tilt_flags(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tilt-flags"))
        .arg("--dir")
        .arg(dir.path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_help_shows_flag_options() {
    let dir = TempDir::new().unwrap();
    let output = tilt_flags(&dir, &["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--positional"));
    assert!(stdout.contains("--manifest"));
}

#[test]
fn test_positional_args_select_resources() {
    let dir = TempDir::new().unwrap();
    let output = tilt_flags(
        &dir,
        &[
            "--positional", "resources", "--select", "resources", "--manifest", "foo",
            "--manifest", "bar", "--manifest", "baz", "--", "foo", "bar",
        ],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains(r#"resources=["foo", "bar"]"#));
    assert!(stdout.contains("resources: foo, bar"));

    let config = fs::read_to_string(dir.path().join("tilt_config.json")).unwrap();
    assert!(config.contains("\"foo\""));
    assert!(dir.path().join(".tilt_flags_state.json").exists());
}

#[test]
fn test_stored_args_win_on_second_run() {
    let dir = TempDir::new().unwrap();
    let first = tilt_flags(&dir, &["--flag", "a", "--", "-a", "1"]);
    assert!(first.status.success());

    let second = tilt_flags(&dir, &["--flag", "a", "--", "-a", "2"]);
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(second.status.success());
    assert!(stdout.contains(r#"a=["1"]"#), "got: {}", stdout);
}

#[test]
fn test_no_parse_uses_args_as_resources() {
    let dir = TempDir::new().unwrap();
    let output = tilt_flags(
        &dir,
        &["--no-parse", "--manifest", "a", "--manifest", "b", "--", "b"],
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("resources: b"));
    assert!(!dir.path().join("tilt_config.json").exists());
}

#[test]
fn test_unknown_flag_exits_with_usage() {
    let dir = TempDir::new().unwrap();
    let output = tilt_flags(&dir, &["--flag", "foo", "--", "-bar", "hello"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("-foo"));
    assert!(stderr.contains("Error: flag provided but not defined: -bar"));
}

#[test]
fn test_select_conflicts_with_no_parse() {
    let dir = TempDir::new().unwrap();
    let output = tilt_flags(
        &dir,
        &["--no-parse", "--positional", "resources", "--select", "resources"],
    );

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot be used with"), "stderr: {}", stderr);
    assert!(!dir.path().join("tilt_config.json").exists());
}
