// tests/integration_test.rs
use std::fs;
use std::process::Command;

use git2::Repository;
use tempfile::TempDir;

fn release_bump_bin() -> &'static str {
    env!("CARGO_BIN_EXE_release-bump")
}

#[test]
fn test_release_bump_help() {
    let output = Command::new(release_bump_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("release-bump"));
    assert!(stdout.contains("Bump the manifest patch version"));
}

#[test]
fn test_release_bump_version_flag() {
    let output = Command::new(release_bump_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("release-bump"));
}

#[test]
fn test_help_performs_no_mutation() {
    let temp_dir = TempDir::new().unwrap();
    let manifest_path = temp_dir.path().join("build.gradle");
    fs::write(&manifest_path, "version = '1.0.0'\n").unwrap();

    let output = Command::new(release_bump_bin())
        .arg("--help")
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&manifest_path).unwrap(),
        "version = '1.0.0'\n"
    );
}

#[test]
fn test_missing_manifest_fails_at_write() {
    // Reader defaults a missing manifest to 0.0.0 and the bump gives 0.0.1,
    // but persisting into a file that still does not exist is fatal.
    let temp_dir = TempDir::new().unwrap();
    Repository::init(temp_dir.path()).unwrap();

    let output = Command::new(release_bump_bin())
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("build.gradle"));
    assert!(!temp_dir.path().join("build.gradle").exists());
}

#[test]
fn test_bump_commit_and_tag_then_push_failure() {
    // A repo with no "origin" remote: the run bumps, commits, and tags, then
    // exits non-zero at the push step. Earlier steps stay applied.
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }

    let manifest_path = temp_dir.path().join("build.gradle");
    fs::write(&manifest_path, "group = 'org.example'\nversion = '1.0.0'\n").unwrap();

    let output = Command::new(release_bump_bin())
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));

    // Manifest rewritten, only the version value changed
    assert_eq!(
        fs::read_to_string(&manifest_path).unwrap(),
        "group = 'org.example'\nversion = '1.0.1'\n"
    );

    // Commit and annotated tag exist despite the failed push
    let repo = Repository::open(temp_dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(
        head.message().unwrap(),
        "chore(release): bump version to 1.0.1"
    );
    let tag = repo
        .find_reference("refs/tags/v1.0.1")
        .unwrap()
        .peel_to_tag()
        .expect("tag should be annotated");
    assert_eq!(tag.message().unwrap().trim_end(), "Release 1.0.1");

    // Bot identity persisted into the repo-local config
    let config = repo.config().unwrap().snapshot().unwrap();
    assert_eq!(config.get_str("user.name").unwrap(), "github-actions[bot]");
}

#[test]
fn test_suffix_dropped_on_bump() {
    let temp_dir = TempDir::new().unwrap();
    Repository::init(temp_dir.path()).unwrap();

    let manifest_path = temp_dir.path().join("build.gradle");
    fs::write(&manifest_path, "version = '1.2.3-SNAPSHOT'\n").unwrap();

    // Push fails (no remote), but the manifest rewrite has already happened
    let output = Command::new(release_bump_bin())
        .current_dir(temp_dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));

    assert_eq!(
        fs::read_to_string(&manifest_path).unwrap(),
        "version = '1.2.4'\n"
    );
}
