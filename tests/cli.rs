//! End-to-end tests for the bempp-bootstrap CLI
//!
//! These run the real binary against a sandboxed source root.

#![cfg(any(target_os = "linux", target_os = "macos"))]

mod common;

use bempp_bootstrap::Config;
use common::*;
use std::path::Path;
use std::process::{Command, Output};

/// Run the bootstrap binary with `--root` pointing at `root`
fn run_bootstrap(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bempp-bootstrap"))
        .args(args)
        .args(["--root", root.to_str().unwrap()])
        .env_remove("BEMPP_ROOT")
        .env_remove("BEMPP_BOOTSTRAP_CONFIG")
        .output()
        .expect("Failed to execute bempp-bootstrap")
}

// =============================================================================
// CLI Help and Argument Tests
// =============================================================================

#[test]
fn test_cli_help_lists_options() {
    let output = Command::new(env!("CARGO_BIN_EXE_bempp-bootstrap"))
        .arg("--help")
        .output()
        .expect("Failed to run bempp-bootstrap --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--prefix"));
    assert!(stdout.contains("--jobs"));
}

#[test]
fn test_cli_rejects_zero_jobs() {
    let sb = Sandbox::new();
    let prefix = sb.prefix.to_str().unwrap();

    let output = run_bootstrap(&sb.root, &["prepare", "--prefix", prefix, "--jobs", "0"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--jobs must be at least 1"), "got {stderr}");
    assert!(!sb.root.join("bootstrap.toml").exists());
}

#[test]
fn test_cli_rejects_unknown_phase() {
    let sb = Sandbox::new();

    let output = run_bootstrap(&sb.root, &["compile"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown phase: compile"), "got {stderr}");
}

// =============================================================================
// Config Persistence Tests
// =============================================================================

#[test]
fn test_cli_prepare_saves_boost_options() {
    let sb = Sandbox::new();
    sb.write_boost_archive();
    sb.write_build_script(FAKE_BUILD_SCRIPT);
    let prefix = sb.prefix.to_str().unwrap();

    let output = run_bootstrap(&sb.root, &["prepare", "--prefix", prefix]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let saved = Config::load(&sb.root.join("bootstrap.toml")).unwrap();
    assert_eq!(saved.get("Main", "prefix").unwrap(), prefix);
    assert_eq!(
        saved.get("Boost", "include_dir").unwrap(),
        format!("{prefix}/bempp/include")
    );
    assert!(saved.has_option("Boost", "unit_test_lib"));
    // The CPU-count default is not written back.
    assert!(!saved.has_option("Main", "build_jobs"));
}

#[test]
fn test_cli_keeps_explicit_jobs_and_custom_config_path() {
    let sb = Sandbox::new();
    sb.write_boost_archive();
    sb.write_build_script(FAKE_BUILD_SCRIPT);
    let config_path = sb.tools.join("conf/bempp.toml");
    let prefix = sb.prefix.to_str().unwrap();

    let output = run_bootstrap(
        &sb.root,
        &[
            "prepare",
            "--prefix",
            prefix,
            "-j",
            "6",
            "--config",
            config_path.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert!(!sb.root.join("bootstrap.toml").exists());
    let saved = Config::load(&config_path).unwrap();
    assert_eq!(saved.get_int("Main", "build_jobs").unwrap(), 6);
}

#[test]
fn test_cli_failed_configure_exits_and_still_saves() {
    let sb = Sandbox::new();
    sb.write_boost_archive();
    sb.write_build_script(FAILING_BUILD_SCRIPT);
    let prefix = sb.prefix.to_str().unwrap();

    let output = run_bootstrap(
        &sb.root,
        &["prepare", "configure", "--prefix", prefix, "--jobs", "2"],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("boost_build.sh"), "got {stderr}");

    let saved = Config::load(&sb.root.join("bootstrap.toml")).unwrap();
    assert_eq!(saved.get("Main", "prefix").unwrap(), prefix);
    assert_eq!(saved.get("Main", "build_jobs").unwrap(), "2");
    // prepare finished before configure failed
    assert!(saved.has_option("Boost", "include_dir"));
}

#[test]
fn test_cli_reports_save_failure_alongside_phase_failure() {
    let sb = Sandbox::new();
    // A regular file where the config directory should be.
    let blocker = sb.tools.join("blocker");
    std::fs::write(&blocker, b"").unwrap();
    let config_path = blocker.join("bootstrap.toml");
    let prefix = sb.prefix.to_str().unwrap();

    // Nothing prepared: configure has no source tree to run in.
    let output = run_bootstrap(
        &sb.root,
        &[
            "configure",
            "--prefix",
            prefix,
            "--config",
            config_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to save config"), "got {stderr}");
    assert!(stderr.contains("command failed to start"), "got {stderr}");
}

#[test]
fn test_cli_loads_existing_config() {
    let sb = Sandbox::new();
    sb.write_boost_archive();
    sb.write_build_script(FAKE_BUILD_SCRIPT);
    let config_path = sb.root.join("bootstrap.toml");
    std::fs::write(
        &config_path,
        format!(
            "[Main]\nprefix = \"{}\"\nbuild_jobs = 3\n\n[Extra]\nkeep = \"me\"\n",
            sb.prefix.display()
        ),
    )
    .unwrap();

    let output = run_bootstrap(&sb.root, &["prepare"]);

    assert!(output.status.success());
    let saved = Config::load(&config_path).unwrap();
    assert_eq!(saved.get("Main", "build_jobs").unwrap(), "3");
    assert_eq!(saved.get("Extra", "keep").unwrap(), "me");
    assert!(saved.has_option("Boost", "include_dir"));
}
