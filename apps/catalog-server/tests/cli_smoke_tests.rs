//! CLI smoke tests for the catalog-server binary
//!
//! These tests verify that the CLI commands work correctly, including
//! configuration validation, help output, and basic command functionality.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;

/// Helper to run the catalog-server binary with given arguments
fn run_catalog_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_catalog-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute catalog-server")
}

/// Helper to run the catalog-server binary with timeout
async fn run_catalog_server_with_timeout(
    args: &[&str],
    timeout_duration: Duration,
) -> Result<std::process::Output, Box<dyn std::error::Error>> {
    let mut cmd = tokio::process::Command::new(env!("CARGO_BIN_EXE_catalog-server"));
    cmd.args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match timeout(timeout_duration, cmd.output()).await {
        Ok(result) => result.map_err(|e| e.into()),
        Err(elapsed) => Err(elapsed.into()),
    }
}

/// Config rooted in `dir` so logs and database files stay inside the temp dir.
fn write_config(dir: &TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    let content = format!(
        "server:\n  home_dir: \"{}\"\n  host: \"127.0.0.1\"\n  port: 0\n{}",
        dir.path().to_string_lossy().replace('\\', "/"),
        body
    );
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

const LOGGING: &str = r#"
logging:
  default:
    console_level: info
    file: "logs/catalog.log"
    file_level: info
    max_backups: 3
    max_size_mb: 100
"#;

#[test]
fn test_cli_help_command() {
    let output = run_catalog_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("catalog-server"), "Should contain binary name");
    assert!(
        stdout.contains("Usage:") || stdout.contains("USAGE:"),
        "Should contain usage information"
    );
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--mock"), "Should mention mock option");
}

#[test]
fn test_cli_version_command() {
    let output = run_catalog_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("catalog-server"), "Should contain binary name");
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_catalog_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid") || stderr.contains("unexpected"),
        "Should contain error message about invalid command"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");

    std::fs::write(&config_path, "invalid: yaml: content: [unclosed")
        .expect("Failed to write file");

    let output = run_catalog_server(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = format!(
        "database:\n  url: \"sqlite://database/catalog.db\"\n{LOGGING}\nmodules:\n  products:\n    default_page_size: 20\n"
    );
    let config_path = write_config(&temp_dir, "valid.yaml", &body);

    let output = run_catalog_server(&["--config", &config_path, "check"]);

    if !output.status.success() {
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
        eprintln!("STDOUT: {}", String::from_utf8_lossy(&output.stdout));
    }
    assert!(output.status.success(), "Should succeed with valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Configuration check passed"),
        "Should indicate successful validation: {}",
        stdout
    );
}

#[test]
fn test_cli_check_rejects_bad_module_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = format!("{LOGGING}\nmodules:\n  products:\n    page_size_typo: 5\n");
    let config_path = write_config(&temp_dir, "bad-module.yaml", &body);

    let output = run_catalog_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Unknown module keys should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("products"),
        "Should name the offending module: {}",
        stderr
    );
}

#[test]
fn test_cli_check_rejects_unsupported_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = format!("database:\n  url: \"postgresql://localhost/catalog\"\n{LOGGING}");
    let config_path = write_config(&temp_dir, "pg.yaml", &body);

    let output = run_catalog_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Only sqlite is supported");
}

#[test]
fn test_cli_mock_flag() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let body = format!("database:\n  url: \"postgresql://localhost/nonexistent\"\n{LOGGING}");
    let config_path = write_config(&temp_dir, "mock.yaml", &body);

    // --mock swaps the database for in-memory sqlite
    let output = run_catalog_server(&["--config", &config_path, "--mock", "check"]);

    if !output.status.success() {
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
    }
    assert!(
        output.status.success(),
        "Should succeed with mock database even if the configured one is unsupported"
    );
}

#[test]
fn test_cli_print_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "print.yaml", LOGGING);

    let output = run_catalog_server(&["--config", &config_path, "--port", "8123", "--print-config"]);

    assert!(output.status.success(), "print-config should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("8123"), "Port override should be printed: {}", stdout);
}

#[tokio::test]
async fn test_cli_run_command_with_mock_database() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "run.yaml", LOGGING);

    // Server should start and keep running until the timeout
    let result = run_catalog_server_with_timeout(
        &["--config", &config_path, "--mock", "run"],
        Duration::from_secs(5),
    )
    .await;

    match result {
        Err(err) => {
            assert!(
                err.to_string().contains("elapsed"),
                "Server failed to start: {}",
                err
            );
        }
        Ok(output) => {
            eprintln!("STDOUT: {}", String::from_utf8_lossy(&output.stdout));
            eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
            panic!("Server exited early with {:?}", output.status);
        }
    }
}

#[test]
fn test_cli_run_rejects_bad_bind_address() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("bad-host.yaml");
    let content = format!(
        "server:\n  home_dir: \"{}\"\n  host: \"not a host\"\n  port: 5000\n{LOGGING}",
        temp_dir.path().to_string_lossy().replace('\\', "/"),
    );
    std::fs::write(&config_path, content).expect("Failed to write config file");

    let output = run_catalog_server(&["--config", config_path.to_str().unwrap(), "--mock", "run"]);

    assert!(!output.status.success(), "Should fail with invalid bind address");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("address") || stderr.contains("invalid"),
        "Should mention address parsing issue: {}",
        stderr
    );
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_catalog_server(&["run", "--help"]);
    assert!(output.status.success(), "Run subcommand help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("server"), "Should describe the run command");

    let output = run_catalog_server(&["check", "--help"]);
    assert!(output.status.success(), "Check subcommand help should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("configuration"),
        "Should describe the check command"
    );
}
