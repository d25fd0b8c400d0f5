use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("{} is already a git repository", .0.display())]
    AlreadyCloned(PathBuf),

    #[error("{} has no branch checked out (detached HEAD)", .0.display())]
    DetachedHead(PathBuf),

    #[error("missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("git {operation} failed: {stderr}")]
    CommandFailed {
        operation: &'static str,
        stderr: String,
    },

    #[error("failed to run git {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },
}
