//! Integration tests for the CLI binary.
//!
//! Verifies that the `scred` binary exists, responds to basic flags, and
//! fails cleanly when the store is not configured.
//!
//! This test is registered as a [[test]] in the student-credentials-cli
//! crate so that CARGO_BIN_EXE_scred is available.

use std::process::Command;

/// Get a Command pointing to the `scred` binary.
fn scred_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scred"));
    // Keep the test hermetic: never pick up the operator's environment.
    cmd.env_remove("REGISTRY_STORE_PATH");
    cmd.env_remove("REGISTRY_DB");
    cmd
}

#[test]
fn cli_responds_to_help() {
    let output = scred_binary()
        .arg("--help")
        .output()
        .expect("failed to execute scred --help");

    assert!(
        output.status.success(),
        "scred --help should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("scred") || stdout.contains("Usage"),
        "scred --help output should contain usage information, got: {stdout}"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = scred_binary()
        .arg("--version")
        .output()
        .expect("failed to execute scred --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0.1"));
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = scred_binary()
        .arg("--nonexistent-flag")
        .output()
        .expect("failed to execute scred");

    assert!(!output.status.success());
}

#[test]
fn cli_fails_without_store_configuration() {
    let output = scred_binary()
        .arg("list-status")
        .output()
        .expect("failed to execute scred list-status");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("REGISTRY_STORE_PATH") || stderr.contains("not configured"),
        "error should name the missing configuration, got: {stderr}"
    );
}

#[test]
fn cli_lists_empty_population() {
    let dir = tempfile::tempdir().unwrap();
    let output = scred_binary()
        .arg("--store")
        .arg(dir.path())
        .arg("list-status")
        .output()
        .expect("failed to execute scred list-status");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0 active students"));
}

#[test]
fn cli_authenticate_unknown_student_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = scred_binary()
        .arg("--store")
        .arg(dir.path())
        .args(["authenticate", "10234567", "12345"])
        .output()
        .expect("failed to execute scred authenticate");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("10234567"),
        "error should name the academic id, got: {stderr}"
    );
}
