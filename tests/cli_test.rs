// tests/cli_test.rs
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the binary in an isolated directory with no user config available.
fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mvn-publish"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute mvn-publish")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("--gradle-version"));
    assert!(text.contains("--module"));
}

#[test]
fn test_missing_url() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(dir.path(), &["-t", "1.0.3", "-m", "library"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("Error: URL is required."));
    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_missing_module() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(
        dir.path(),
        &["-u", "https://github.com/minibugdev/DrawableBadge", "-t", "1.0.3"],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("Error: Module is required, eg; app or lib:dfu"));
}

#[test]
fn test_missing_reference() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(
        dir.path(),
        &["-u", "https://github.com/minibugdev/DrawableBadge", "-m", "library"],
    );

    assert_eq!(output.status.code(), Some(3));
    assert!(stdout(&output).contains("You must specify a tag, branch, or commit."));
    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_tag_and_branch_together_are_rejected() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(
        dir.path(),
        &[
            "-u",
            "https://github.com/minibugdev/DrawableBadge",
            "-m",
            "library",
            "-t",
            "1.0.3",
            "-b",
            "main",
        ],
    );

    assert!(!output.status.success());
    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_dry_run_prints_plan_without_side_effects() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(
        dir.path(),
        &[
            "-u",
            "https://github.com/someweardev/Android-DFU-Library",
            "-m",
            "lib:dfu",
            "-t",
            "2.3.0",
            "--gradle-version",
            "6.5",
            "--dry-run",
        ],
    );

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains(
        "Publishing \"com.github.someweardev:android-dfu-library:2.3.0\" to https://somewear-artifacts.appspot.com"
    ));
    assert!(text.contains("tags/2.3.0"));
    assert!(text.contains("lib:dfu:assemble"));
    assert!(text.contains("deploy:deploy-file"));
    assert!(!dir.path().join("build").exists());
}

#[test]
fn test_repository_url_override_in_dry_run() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(
        dir.path(),
        &[
            "-u",
            "https://github.com/acme/widgets",
            "-m",
            ":",
            "-c",
            "3febbac689",
            "-v",
            "9.9.9",
            "--repository-url",
            "https://maven.example.com/releases",
            "--dry-run",
        ],
    );

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains(
        "Publishing \"com.github.acme:widgets:9.9.9\" to https://maven.example.com/releases"
    ));
    assert!(text.contains("-Durl=https://maven.example.com/releases"));
}

#[test]
fn test_progress_is_reported_on_stdout() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("acme").join("widgets");
    let output = run_cli(
        dir.path(),
        &["-u", missing.to_str().unwrap(), "-m", "library", "-t", "1.0.3"],
    );

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Publishing \"com.github.acme:widgets:1.0.3\""));
    assert!(text.contains(&format!("Cloning {}", missing.display())));
    assert!(!text.contains("Building"));
    assert!(!dir.path().join("build/script/widgets").exists());
}
