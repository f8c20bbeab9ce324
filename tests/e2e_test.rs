//! End-to-end tests for the gitsem binary
//!
//! Each test builds a real repository in a temp dir with git2, runs the
//! binary there, then inspects the resulting commits and tags with git2.
//! Requires a `git` executable on PATH.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use git2::Repository;
use predicates::prelude::*;
use tempfile::TempDir;

/// Initialize an empty repository with a local identity
fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    let mut config = repo.config().expect("Could not get config");
    config
        .set_str("user.name", "Test User")
        .expect("Could not set user.name");
    config
        .set_str("user.email", "test@example.com")
        .expect("Could not set user.email");
    config
        .set_bool("commit.gpgsign", false)
        .expect("Could not set commit.gpgsign");
    config
        .set_bool("tag.gpgsign", false)
        .expect("Could not set tag.gpgsign");

    temp_dir
}

/// Commit a single file with git2
fn commit_file(dir: &Path, name: &str, contents: &str, message: &str) {
    let repo = Repository::open(dir).expect("Could not open repo");
    fs::write(dir.join(name), contents).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");
    let sig = repo.signature().expect("Could not get sig");

    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().expect("HEAD is not a commit")],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit");
}

fn gitsem(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitsem").expect("gitsem binary");
    cmd.current_dir(dir)
        .env_remove("GITSEM_LOG")
        .env("XDG_CONFIG_HOME", dir.join(".no-user-config"));
    if let Some(parent) = dir.parent() {
        cmd.env("GIT_CEILING_DIRECTORIES", parent);
    }
    cmd
}

fn head_message(dir: &Path) -> Option<String> {
    let repo = Repository::open(dir).expect("Could not open repo");
    let head = repo.head().ok()?;
    let commit = head.peel_to_commit().ok()?;
    commit.message().map(|m| m.trim_end().to_string())
}

fn commit_count(dir: &Path) -> usize {
    let repo = Repository::open(dir).expect("Could not open repo");
    let mut revwalk = repo.revwalk().expect("Could not walk");
    if revwalk.push_head().is_err() {
        return 0;
    }
    revwalk.count()
}

fn tag_names(dir: &Path) -> Vec<String> {
    let repo = Repository::open(dir).expect("Could not open repo");
    let tags = repo.tag_names(None).expect("Could not list tags");
    tags.iter().flatten().map(|s| s.to_string()).collect()
}

fn tag_points_at_head(dir: &Path, tag: &str) -> bool {
    let repo = Repository::open(dir).expect("Could not open repo");
    let head = repo.head().unwrap().peel_to_commit().unwrap().id();
    let tagged = repo
        .find_reference(&format!("refs/tags/{}", tag))
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .id();
    head == tagged
}

#[test]
fn test_patch_on_empty_repo() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();

    gitsem(dir)
        .arg("patch")
        .assert()
        .success()
        .stdout("v0.0.1\n");

    assert_eq!(fs::read_to_string(dir.join("VERSION")).unwrap(), "0.0.1");
    assert_eq!(commit_count(dir), 1);
    assert_eq!(head_message(dir).as_deref(), Some("v0.0.1"));
    assert_eq!(tag_names(dir), vec!["v0.0.1".to_string()]);
    assert!(tag_points_at_head(dir, "v0.0.1"));
}

#[test]
fn test_explicit_prerelease_from_existing_version() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    commit_file(dir, "VERSION", "1.4.2", "v1.4.2");

    gitsem(dir)
        .arg("2.0.0-beta")
        .assert()
        .success()
        .stdout("v2.0.0-beta\n");

    assert_eq!(
        fs::read_to_string(dir.join("VERSION")).unwrap(),
        "2.0.0-beta"
    );
    assert_eq!(commit_count(dir), 2);
    assert_eq!(head_message(dir).as_deref(), Some("v2.0.0-beta"));
    assert!(tag_points_at_head(dir, "v2.0.0-beta"));
}

#[test]
fn test_message_template_and_no_tag() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    commit_file(dir, "VERSION", "1.4.2\n", "initial");

    gitsem(dir)
        .args(["-m", "release %s", "-tag=false", "minor"])
        .assert()
        .success()
        .stdout("v1.5.0\n");

    assert_eq!(head_message(dir).as_deref(), Some("release v1.5.0"));
    assert!(tag_names(dir).is_empty());
}

#[test]
fn test_dirty_tree_refused() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    commit_file(dir, "VERSION", "1.0.0", "v1.0.0");
    fs::write(dir.join("scratch.txt"), "work in progress").unwrap();

    gitsem(dir)
        .arg("major")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("not clean"));

    assert_eq!(fs::read_to_string(dir.join("VERSION")).unwrap(), "1.0.0");
    assert_eq!(commit_count(dir), 1);
}

#[test]
fn test_dirty_tree_with_skip_flag() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    commit_file(dir, "VERSION", "1.0.0", "v1.0.0");
    fs::write(dir.join("scratch.txt"), "work in progress").unwrap();

    gitsem(dir)
        .args(["-n", "major"])
        .assert()
        .success()
        .stdout("v2.0.0\n");

    assert_eq!(head_message(dir).as_deref(), Some("v2.0.0"));
    // only VERSION was staged
    assert!(dir.join("scratch.txt").exists());
    let repo = Repository::open(dir).unwrap();
    let status = repo.status_file(Path::new("scratch.txt")).unwrap();
    assert!(status.contains(git2::Status::WT_NEW));
}

#[test]
fn test_preview_on_dirty_tree() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    fs::write(dir.join("scratch.txt"), "work in progress").unwrap();

    gitsem(dir)
        .args(["-preview", "patch"])
        .assert()
        .success()
        .stdout("git repo isn't clean\ncurrent version: v0.0.0\n    new version: v0.0.1\n")
        .stderr("");

    assert!(!dir.join("VERSION").exists());
    assert_eq!(commit_count(dir), 0);
    assert!(tag_names(dir).is_empty());
}

#[test]
fn test_preview_on_clean_tree() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    commit_file(dir, "VERSION", "0.3.9", "v0.3.9");

    gitsem(dir)
        .args(["--preview", "v1.0.0"])
        .assert()
        .success()
        .stdout("current version: v0.3.9\n    new version: v1.0.0\n");

    assert_eq!(fs::read_to_string(dir.join("VERSION")).unwrap(), "0.3.9");
    assert_eq!(commit_count(dir), 1);
}

#[test]
fn test_not_a_repository() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    gitsem(dir)
        .arg("patch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not inside a git repository"));

    assert!(!dir.join("VERSION").exists());
}

#[test]
fn test_malformed_literal() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();

    gitsem(dir)
        .arg("v1.two.3")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid version"));

    assert!(!dir.join("VERSION").exists());
}

#[test]
fn test_malformed_version_file() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    commit_file(dir, "VERSION", "release one", "initial");

    gitsem(dir)
        .arg("patch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("VERSION"));

    assert_eq!(commit_count(dir), 1);
}

#[test]
fn test_existing_tag_fails_after_commit() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    commit_file(dir, "VERSION", "1.0.0", "v1.0.0");
    {
        let repo = Repository::open(dir).unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.tag_lightweight("v1.0.1", head.as_object(), false)
            .unwrap();
    }

    gitsem(dir)
        .arg("patch")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("git tag v1.0.1 failed"));

    // the version commit stays, nothing is rolled back
    assert_eq!(commit_count(dir), 2);
    assert_eq!(head_message(dir).as_deref(), Some("v1.0.1"));
}

#[test]
fn test_config_file_defaults() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("gitsem.toml");
    fs::write(&config_path, "message = \"chore: release %s\"\ntag = false\n").unwrap();

    gitsem(dir)
        .arg("--config")
        .arg(&config_path)
        .arg("minor")
        .assert()
        .success()
        .stdout("v0.1.0\n");

    assert_eq!(head_message(dir).as_deref(), Some("chore: release v0.1.0"));
    assert!(tag_names(dir).is_empty());
}

#[test]
fn test_flags_override_config_file() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("gitsem.toml");
    fs::write(&config_path, "message = \"chore: release %s\"\ntag = false\n").unwrap();

    gitsem(dir)
        .arg("--config")
        .arg(&config_path)
        .args(["-m", "%s", "--tag", "minor"])
        .assert()
        .success();

    assert_eq!(head_message(dir).as_deref(), Some("v0.1.0"));
    assert_eq!(tag_names(dir), vec!["v0.1.0".to_string()]);
}

#[test]
fn test_empty_message_is_usage_error() {
    let temp_dir = setup_test_repo();
    let dir = temp_dir.path();

    gitsem(dir)
        .args(["-m", "", "patch"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing message"));

    assert!(!dir.join("VERSION").exists());
}

#[test]
fn test_help_exits_zero() {
    let temp_dir = TempDir::new().unwrap();

    gitsem(temp_dir.path())
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("major | minor | patch"));
}

#[test]
fn test_missing_argument_exits_one() {
    let temp_dir = TempDir::new().unwrap();

    gitsem(temp_dir.path()).assert().code(1);
}

#[test]
fn test_extra_argument_exits_one() {
    let temp_dir = setup_test_repo();

    gitsem(temp_dir.path())
        .args(["patch", "minor"])
        .assert()
        .code(1);
}
