//! Background git jobs
//!
//! Clone/pull/push can take a while over SSH, so they run on a worker thread
//! and report back through a channel the update loop polls.

use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use crate::git::{CliGitClient, Credentials, GitClient, GitError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitAction {
    Clone,
    Pull,
    Push,
}

impl fmt::Display for GitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitAction::Clone => write!(f, "clone"),
            GitAction::Pull => write!(f, "pull"),
            GitAction::Push => write!(f, "push"),
        }
    }
}

/// Everything a worker needs, captured from the panel at click time.
#[derive(Debug, Clone)]
pub struct GitJob {
    pub action: GitAction,
    pub dir: PathBuf,
    pub remote: String,
    pub credentials: Credentials,
    pub commit_message: String,
}

#[derive(Debug)]
pub struct GitOutcome {
    pub action: GitAction,
    pub result: Result<String, GitError>,
}

/// Run `job` against `client`, returning a one-line summary on success.
pub fn run_git_job(client: &dyn GitClient, job: &GitJob) -> Result<String, GitError> {
    match job.action {
        GitAction::Clone => {
            client.clone_repo(&job.dir, &job.remote, &job.credentials)?;
            Ok(format!("Cloned {} into {}", job.remote, job.dir.display()))
        }
        GitAction::Pull => {
            client.pull(&job.dir, &job.remote, &job.credentials)?;
            Ok(format!("Pulled from {}", job.remote))
        }
        GitAction::Push => {
            let committed =
                client.publish(&job.dir, &job.remote, &job.credentials, &job.commit_message)?;
            if committed {
                Ok(format!("Committed and pushed to {}", job.remote))
            } else {
                Ok(format!("Nothing new to commit; pushed to {}", job.remote))
            }
        }
    }
}

/// Run `job` on a new thread with the git CLI.
pub fn spawn_git_job(job: GitJob) -> Receiver<GitOutcome> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let client = CliGitClient::new();
        let result = run_git_job(&client, &job);
        let _ = tx.send(GitOutcome {
            action: job.action,
            result,
        });
    });
    rx
}
