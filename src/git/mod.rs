//! Git operations for the site repository

mod client;
mod error;
mod remote;

#[cfg(test)]
mod tests;

pub use client::{is_repository, CliGitClient, GitClient, DEFAULT_COMMIT_MESSAGE};
pub use error::GitError;
pub use remote::{remote_url, Credentials};
