//! Git client backed by the `git` binary

use std::path::Path;
use std::process::{Command, Output};

use tracing::{debug, info};

use super::{Credentials, GitError};

/// Default commit message used when publishing from the panel.
pub const DEFAULT_COMMIT_MESSAGE: &str = "feat: commit";

/// A directory is a repository when it has a `.git` entry.
pub fn is_repository(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// The git operations the control panel offers.
pub trait GitClient {
    /// Clone `remote` into `dir`, which must be missing or empty.
    fn clone_repo(&self, dir: &Path, remote: &str, creds: &Credentials) -> Result<(), GitError>;

    /// Fast-forward the current branch from `remote`.
    fn pull(&self, dir: &Path, remote: &str, creds: &Credentials) -> Result<(), GitError>;

    /// Stage everything and commit. Returns `false` when there was nothing to commit.
    fn commit(&self, dir: &Path, message: &str) -> Result<bool, GitError>;

    /// Push the current branch to `remote`.
    fn push(&self, dir: &Path, remote: &str, creds: &Credentials) -> Result<(), GitError>;

    /// Commit all local changes, then push.
    fn publish(
        &self,
        dir: &Path,
        remote: &str,
        creds: &Credentials,
        message: &str,
    ) -> Result<bool, GitError> {
        let committed = self.commit(dir, message)?;
        self.push(dir, remote, creds)?;
        Ok(committed)
    }
}

/// Runs git as a subprocess, passing the SSH key through `GIT_SSH_COMMAND`.
#[derive(Debug, Clone)]
pub struct CliGitClient {
    binary: String,
}

impl CliGitClient {
    pub fn new() -> Self {
        Self::with_binary("git")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Get the current branch name. A detached HEAD has none.
    pub fn current_branch(&self, dir: &Path) -> Result<String, GitError> {
        let result = self.run(
            "symbolic-ref",
            self.command(dir, None)
                .args(["symbolic-ref", "--quiet", "--short", "HEAD"]),
        );
        match result {
            Ok(output) => Ok(stdout(&output)),
            Err(GitError::CommandFailed { .. }) => Err(GitError::DetachedHead(dir.to_path_buf())),
            Err(e) => Err(e),
        }
    }

    /// Check if the repo has uncommitted changes
    pub fn has_uncommitted_changes(&self, dir: &Path) -> Result<bool, GitError> {
        let output = self.run("status", self.command(dir, None).args(["status", "--porcelain"]))?;
        Ok(!output.stdout.is_empty())
    }

    fn command(&self, dir: &Path, creds: Option<&Credentials>) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.current_dir(dir).env("GIT_TERMINAL_PROMPT", "0");
        if let Some(ssh) = creds.and_then(Credentials::ssh_command) {
            cmd.env("GIT_SSH_COMMAND", ssh);
        }
        cmd
    }

    fn run(&self, operation: &'static str, cmd: &mut Command) -> Result<Output, GitError> {
        debug!("Running {:?}", cmd);
        let output = cmd
            .output()
            .map_err(|source| GitError::Io { operation, source })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                operation,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }

    fn require_repository(dir: &Path) -> Result<(), GitError> {
        if is_repository(dir) {
            Ok(())
        } else {
            Err(GitError::NotARepository(dir.to_path_buf()))
        }
    }
}

impl Default for CliGitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitClient for CliGitClient {
    fn clone_repo(&self, dir: &Path, remote: &str, creds: &Credentials) -> Result<(), GitError> {
        if is_repository(dir) {
            return Err(GitError::AlreadyCloned(dir.to_path_buf()));
        }

        std::fs::create_dir_all(dir).map_err(|source| GitError::Io {
            operation: "clone",
            source,
        })?;

        info!("Cloning {} into {}", remote, dir.display());
        self.run(
            "clone",
            self.command(dir, Some(creds)).args(["clone", "--", remote, "."]),
        )?;
        Ok(())
    }

    fn pull(&self, dir: &Path, remote: &str, creds: &Credentials) -> Result<(), GitError> {
        Self::require_repository(dir)?;
        let branch = self.current_branch(dir)?;

        info!("Pulling {} from {}", branch, remote);
        self.run(
            "pull",
            self.command(dir, Some(creds))
                .args(["pull", "--ff-only", remote, branch.as_str()]),
        )?;
        Ok(())
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<bool, GitError> {
        Self::require_repository(dir)?;

        self.run("add", self.command(dir, None).args(["add", "-A"]))?;
        if !self.has_uncommitted_changes(dir)? {
            debug!("Nothing to commit in {}", dir.display());
            return Ok(false);
        }

        self.run("commit", self.command(dir, None).args(["commit", "-m", message]))?;
        info!("Committed changes in {}", dir.display());
        Ok(true)
    }

    fn push(&self, dir: &Path, remote: &str, creds: &Credentials) -> Result<(), GitError> {
        Self::require_repository(dir)?;
        let branch = self.current_branch(dir)?;

        info!("Pushing {} to {}", branch, remote);
        let refspec = format!("HEAD:refs/heads/{}", branch);
        self.run(
            "push",
            self.command(dir, Some(creds)).args(["push", remote, refspec.as_str()]),
        )?;
        Ok(())
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
