use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use mtp::{PublishConfig, Workspace};

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("Failed to execute git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

struct Fixture {
    _temp_dir: TempDir,
    bare: PathBuf,
    redirect: PathBuf,
    build_dir: PathBuf,
    config: PublishConfig,
}

fn setup() -> Fixture {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let bare = root.join("remote.git");
    fs::create_dir_all(&bare).unwrap();
    git(&bare, &["init", "--quiet", "--bare"]);

    let build_dir = root.join("build");
    fs::create_dir_all(&build_dir).unwrap();
    fs::write(build_dir.join("index.htm"), "<html>deck</html>").unwrap();
    fs::write(build_dir.join("presentation.css"), "h1{color:blue}").unwrap();

    let redirect = root.join("index.htm");
    fs::write(&redirect, "<html>redirect</html>").unwrap();

    let config = PublishConfig {
        workspace_dir: root.join("workspace"),
        repo_dir: root.to_path_buf(),
        remote_url: Some(bare.to_string_lossy().into_owned()),
        ..PublishConfig::default()
    };

    Fixture {
        _temp_dir: temp_dir,
        bare,
        redirect,
        build_dir,
        config,
    }
}

fn commit_count(bare: &Path, branch: &str) -> usize {
    git(bare, &["rev-list", "--count", branch])
        .parse()
        .expect("Failed to parse commit count")
}

#[test]
fn test_first_publish_creates_orphan_branch_with_one_commit() {
    let fx = setup();

    mtp::publish(&fx.redirect, &fx.build_dir, &fx.config).expect("Publish failed");

    assert_eq!(commit_count(&fx.bare, "gh-pages"), 1);

    let mut files: Vec<String> = git(&fx.bare, &["ls-tree", "-r", "--name-only", "gh-pages"])
        .lines()
        .map(str::to_string)
        .collect();
    files.sort();
    assert_eq!(
        files,
        vec!["build/index.htm", "build/presentation.css", "index.htm"]
    );
}

#[test]
fn test_second_publish_without_changes_is_a_noop() {
    let fx = setup();

    mtp::publish(&fx.redirect, &fx.build_dir, &fx.config).expect("First publish failed");
    mtp::publish(&fx.redirect, &fx.build_dir, &fx.config).expect("Second publish failed");

    assert_eq!(commit_count(&fx.bare, "gh-pages"), 1);
}

#[test]
fn test_changed_build_produces_exactly_one_new_commit() {
    let fx = setup();

    mtp::publish(&fx.redirect, &fx.build_dir, &fx.config).expect("First publish failed");

    fs::write(fx.build_dir.join("index.htm"), "<html>deck v2</html>").unwrap();
    mtp::publish(&fx.redirect, &fx.build_dir, &fx.config).expect("Second publish failed");

    assert_eq!(commit_count(&fx.bare, "gh-pages"), 2);

    let tip = git(
        &fx.bare,
        &["show", "gh-pages:build/index.htm"],
    );
    assert_eq!(tip, "<html>deck v2</html>");
}

#[test]
fn test_deleting_workspace_forces_fresh_checkout_without_spurious_commit() {
    let fx = setup();

    mtp::publish(&fx.redirect, &fx.build_dir, &fx.config).expect("First publish failed");

    fs::remove_dir_all(&fx.config.workspace_dir).unwrap();
    mtp::publish(&fx.redirect, &fx.build_dir, &fx.config).expect("Republish failed");

    assert_eq!(commit_count(&fx.bare, "gh-pages"), 1);
}

#[test]
fn test_publish_replaces_files_removed_from_build() {
    let fx = setup();

    fs::write(fx.build_dir.join("old-asset.png"), "png").unwrap();
    mtp::publish(&fx.redirect, &fx.build_dir, &fx.config).expect("First publish failed");

    fs::remove_file(fx.build_dir.join("old-asset.png")).unwrap();
    mtp::publish(&fx.redirect, &fx.build_dir, &fx.config).expect("Second publish failed");

    let files = git(&fx.bare, &["ls-tree", "-r", "--name-only", "gh-pages"]);
    assert!(!files.contains("old-asset.png"));
}

#[test]
fn test_publish_missing_build_dir_is_fatal() {
    let fx = setup();

    let result = mtp::publish(&fx.redirect, &fx._temp_dir.path().join("nope"), &fx.config);
    assert!(matches!(result, Err(mtp::MtpError::MissingInput(_))));
}

#[test]
fn test_publish_unreachable_remote_fails() {
    let mut fx = setup();
    fx.config.remote_url = Some("/no/such/remote.git".to_string());

    let result = mtp::publish(&fx.redirect, &fx.build_dir, &fx.config);
    assert!(result.is_err());
    // The remote was never touched.
    let branches = git(&fx.bare, &["branch", "--list"]);
    assert!(branches.is_empty());
}

#[test]
fn test_workspace_destroy_removes_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("workspace");

    let workspace = Workspace::open(&root).expect("Failed to open workspace");
    assert!(root.join(".git").is_dir());

    workspace.destroy().expect("Failed to destroy workspace");
    assert!(!root.exists());
}
