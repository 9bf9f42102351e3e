//! Smoke tests for the credkeep CLI
//!
//! These run the built binary and never touch the platform credential store.

use std::process::Command;

fn credkeep() -> Command {
    Command::new(env!("CARGO_BIN_EXE_credkeep"))
}

/// Test that the CLI can show help
#[test]
fn test_cli_help() {
    let output = credkeep().arg("--help").output().expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for command in ["get", "set", "delete", "push-token", "config"] {
        assert!(stdout.contains(command), "help should mention '{}'", command);
    }
}

/// Test that version is shown
#[test]
fn test_cli_version() {
    let output = credkeep().arg("--version").output().expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("credkeep"));
}

#[test]
fn test_unknown_backend_rejected() {
    let output = credkeep()
        .args(["--backend", "cloud", "get", "k"])
        .env_remove("CREDKEEP_BACKEND")
        .output()
        .expect("Failed to execute command");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unknown backend"), "stderr: {}", stderr);
}

#[test]
fn test_config_json_reflects_flags() {
    let output = credkeep()
        .args([
            "--service",
            "com.example.cli",
            "--access-group",
            "TEAM.shared",
            "--backend",
            "memory",
            "config",
            "--json",
        ])
        .env_remove("CREDKEEP_SERVICE")
        .env_remove("CREDKEEP_ACCESS_GROUP")
        .env_remove("CREDKEEP_BACKEND")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["service"], "com.example.cli");
    assert_eq!(config["access_group"], "TEAM.shared");
    assert_eq!(config["backend"], "memory");
}

#[test]
fn test_default_service_is_push_service() {
    let output = credkeep()
        .args(["--backend", "memory", "config", "--json"])
        .env_remove("CREDKEEP_SERVICE")
        .output()
        .expect("Failed to execute command");

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["service"], credkeep_lib::PUSH_TOKEN_SERVICE);
}

#[test]
fn test_memory_backend_reads_absent() {
    let output = credkeep()
        .args(["--backend", "memory", "get", "anything"])
        .output()
        .expect("Failed to execute command");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("(absent)"));
}
