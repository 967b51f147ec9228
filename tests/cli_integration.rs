//! CLI integration tests
//!
//! These tests run the compiled binary and verify end-user behavior:
//! argument handling, generation in a real directory, and exit codes.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the dockermi binary
fn dockermi_bin() -> PathBuf {
    // In tests, the binary should be at target/debug/dockermi
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // If we're in deps/, go up one more level
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join("dockermi")
}

fn write_descriptor(root: &Path, subdir: &str, content: &str) {
    let dir = root.join(subdir);
    fs::create_dir_all(&dir).expect("create descriptor dir");
    fs::write(dir.join("docker-compose.yml"), content).expect("write descriptor");
}

fn create_project() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");

    write_descriptor(
        dir.path(),
        "web",
        "services:\n  web:\n    labels:\n      - \"dockermi.order=10\"\n      - \"dockermi.active=true\"\n",
    );
    write_descriptor(
        dir.path(),
        "db",
        "services:\n  db:\n    labels:\n      - \"dockermi.order=05\"\n      - \"dockermi.active=true\"\n",
    );

    dir
}

#[test]
fn test_cli_help() {
    let output = Command::new(dockermi_bin())
        .arg("--help")
        .output()
        .expect("run dockermi --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dockermi"));
    assert!(stdout.contains("create"));
    assert!(stdout.contains("up"));
    assert!(stdout.contains("down"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(dockermi_bin())
        .arg("--version")
        .output()
        .expect("run dockermi --version");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_bare_invocation_generates_script() {
    let dir = create_project();

    let output = Command::new(dockermi_bin())
        .current_dir(dir.path())
        .output()
        .expect("run dockermi");

    assert!(output.status.success());
    let script_path = dir.path().join("dockermi.sh");
    assert!(script_path.exists());

    let script = fs::read_to_string(&script_path).unwrap();
    let start_db = script.find("Starting db").expect("db start line");
    let start_web = script.find("Starting web").expect("web start line");
    assert!(start_db < start_web);
}

#[test]
fn test_generate_with_explicit_path() {
    let dir = create_project();

    let output = Command::new(dockermi_bin())
        .arg("generate")
        .arg(dir.path())
        .output()
        .expect("run dockermi generate");

    assert!(output.status.success());
    assert!(dir.path().join("dockermi.sh").exists());
}

#[test]
fn test_empty_directory_succeeds_without_script() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(dockermi_bin())
        .current_dir(dir.path())
        .output()
        .expect("run dockermi");

    assert!(output.status.success());
    assert!(!dir.path().join("dockermi.sh").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No docker-compose services found"));
}

#[test]
fn test_force_flag_includes_unlabeled_services() {
    let dir = TempDir::new().unwrap();
    write_descriptor(dir.path(), "app", "services:\n  app:\n    image: busybox\n");

    let output = Command::new(dockermi_bin())
        .arg("--force")
        .current_dir(dir.path())
        .output()
        .expect("run dockermi --force");

    assert!(output.status.success());
    let script = fs::read_to_string(dir.path().join("dockermi.sh")).unwrap();
    assert!(script.contains("Starting app"));
}

#[test]
fn test_create_with_unknown_key_fails() {
    let dir = create_project();

    let output = Command::new(dockermi_bin())
        .arg("create")
        .arg("nosuchkey")
        .arg(dir.path())
        .output()
        .expect("run dockermi create");

    assert!(!output.status.success());
}

#[test]
fn test_up_without_script_fails() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(dockermi_bin())
        .arg("up")
        .current_dir(dir.path())
        .output()
        .expect("run dockermi up");

    assert!(!output.status.success());
}

#[test]
fn test_malformed_descriptor_fails_generation() {
    let dir = create_project();
    write_descriptor(dir.path(), "broken", "services: [oops\n");

    let output = Command::new(dockermi_bin())
        .current_dir(dir.path())
        .output()
        .expect("run dockermi");

    assert!(!output.status.success());
    assert!(!dir.path().join("dockermi.sh").exists());
}
