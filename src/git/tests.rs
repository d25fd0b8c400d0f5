//! Tests for CliGitClient against a local bare remote

use super::{is_repository, CliGitClient, Credentials, GitClient, GitError};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run git {:?}: {}", args, e));
    assert!(
        output.status.success(),
        "git {:?} failed:\nstdout:\n{}\nstderr:\n{}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn configure_identity(repo: &Path) {
    git(repo, &["config", "user.email", "test@example.com"]);
    git(repo, &["config", "user.name", "Test User"]);
}

/// Bare remote with one commit on `main`; returns its path.
fn seeded_remote(tmp: &TempDir) -> String {
    let remote = tmp.path().join("remote.git");
    let seed = tmp.path().join("seed");
    fs::create_dir_all(&remote).unwrap();
    fs::create_dir_all(&seed).unwrap();

    git(&remote, &["init", "--bare", "--initial-branch=main"]);
    git(&seed, &["init", "--initial-branch=main"]);
    configure_identity(&seed);
    fs::write(seed.join("config.toml"), "title = \"site\"\n").unwrap();
    git(&seed, &["add", "config.toml"]);
    git(&seed, &["commit", "-m", "init"]);
    git(&seed, &["push", remote.to_str().unwrap(), "main"]);

    remote.display().to_string()
}

#[test]
fn clone_then_refuse_second_clone() {
    let tmp = TempDir::new().expect("tempdir");
    let remote = seeded_remote(&tmp);
    let site = tmp.path().join("site");
    let client = CliGitClient::new();

    assert!(!is_repository(&site));
    client
        .clone_repo(&site, &remote, &Credentials::default())
        .expect("clone");
    assert!(is_repository(&site));
    assert!(site.join("config.toml").exists());

    let err = client
        .clone_repo(&site, &remote, &Credentials::default())
        .unwrap_err();
    assert!(matches!(err, GitError::AlreadyCloned(_)));
}

#[test]
fn commit_reports_nothing_to_commit() {
    let tmp = TempDir::new().expect("tempdir");
    let remote = seeded_remote(&tmp);
    let site = tmp.path().join("site");
    let client = CliGitClient::new();
    client
        .clone_repo(&site, &remote, &Credentials::default())
        .unwrap();
    configure_identity(&site);

    assert!(!client.commit(&site, "noop").unwrap());

    fs::write(site.join("post.md"), "# hello\n").unwrap();
    assert!(client.commit(&site, "add post").unwrap());
    assert_eq!(git(&site, &["log", "-1", "--format=%s"]), "add post");
}

#[test]
fn publish_then_pull_elsewhere() {
    let tmp = TempDir::new().expect("tempdir");
    let remote = seeded_remote(&tmp);
    let client = CliGitClient::new();
    let creds = Credentials::default();

    let author = tmp.path().join("author");
    let reader = tmp.path().join("reader");
    client.clone_repo(&author, &remote, &creds).unwrap();
    client.clone_repo(&reader, &remote, &creds).unwrap();
    configure_identity(&author);

    fs::write(author.join("about.md"), "about\n").unwrap();
    assert!(client.publish(&author, &remote, &creds, "add about").unwrap());

    client.pull(&reader, &remote, &creds).expect("pull");
    assert_eq!(fs::read_to_string(reader.join("about.md")).unwrap(), "about\n");
}

#[test]
fn operations_require_a_repository() {
    let tmp = TempDir::new().expect("tempdir");
    let client = CliGitClient::new();
    let creds = Credentials::default();

    assert!(matches!(
        client.pull(tmp.path(), "ssh://example.invalid/x.git", &creds),
        Err(GitError::NotARepository(_))
    ));
    assert!(matches!(
        client.commit(tmp.path(), "msg"),
        Err(GitError::NotARepository(_))
    ));
    assert!(matches!(
        client.push(tmp.path(), "ssh://example.invalid/x.git", &creds),
        Err(GitError::NotARepository(_))
    ));
}

#[test]
fn failing_command_carries_stderr() {
    let tmp = TempDir::new().expect("tempdir");
    let site = tmp.path().join("site");
    let missing = tmp.path().join("missing.git").display().to_string();

    let err = CliGitClient::new()
        .clone_repo(&site, &missing, &Credentials::default())
        .unwrap_err();
    match err {
        GitError::CommandFailed { operation, stderr } => {
            assert_eq!(operation, "clone");
            assert!(!stderr.is_empty());
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[test]
fn detached_head_is_neither_pushed_nor_pulled() {
    let tmp = TempDir::new().expect("tempdir");
    let remote = seeded_remote(&tmp);
    let site = tmp.path().join("site");
    let client = CliGitClient::new();
    let creds = Credentials::default();
    client.clone_repo(&site, &remote, &creds).unwrap();
    git(&site, &["checkout", "--detach"]);

    assert!(matches!(
        client.current_branch(&site),
        Err(GitError::DetachedHead(_))
    ));
    assert!(matches!(
        client.push(&site, &remote, &creds),
        Err(GitError::DetachedHead(_))
    ));
    assert!(matches!(
        client.pull(&site, &remote, &creds),
        Err(GitError::DetachedHead(_))
    ));

    let remote_refs = git(Path::new(&remote), &["for-each-ref", "--format=%(refname)"]);
    assert_eq!(remote_refs, "refs/heads/main");
}

#[test]
fn current_branch_follows_checkout() {
    let tmp = TempDir::new().expect("tempdir");
    let remote = seeded_remote(&tmp);
    let site = tmp.path().join("site");
    let client = CliGitClient::new();
    client
        .clone_repo(&site, &remote, &Credentials::default())
        .unwrap();

    assert_eq!(client.current_branch(&site).unwrap(), "main");
    git(&site, &["checkout", "-b", "draft"]);
    assert_eq!(client.current_branch(&site).unwrap(), "draft");
}
