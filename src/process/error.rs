//! Error taxonomy for process supervision

use std::io;

/// Errors raised while probing, spawning, or stopping the preview server.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The pid is not a positive integer that fits a `pid_t`.
    #[error("invalid pid {0}")]
    InvalidArgument(i64),

    /// The OS refused to start the child process.
    #[error("failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: io::Error,
    },

    /// A signal or wait call failed with an unexpected OS error.
    #[error("signal to pid {pid} failed: {source}")]
    SignalFailed {
        pid: u32,
        #[source]
        source: io::Error,
    },

    /// The process was already gone when we tried to kill or wait on it.
    ///
    /// `Supervisor::stop` converts this into success.
    #[error("process {0} already exited")]
    AlreadyExited(u32),

    /// `start` was called while a child is still tracked.
    #[error("a server process is already tracked (pid {0})")]
    AlreadyRunning(u32),

    /// Liveness probing is only implemented for unix targets.
    #[error("process liveness checks are not supported on this platform")]
    Unsupported,
}

impl ProcessError {
    /// Classify an error from `kill`/`wait` on a pid we own.
    ///
    /// ESRCH and ECHILD mean the process (or its zombie) is gone. std reports
    /// `InvalidInput` when killing a child that has already been reaped.
    pub(crate) fn from_signal(pid: u32, err: io::Error) -> Self {
        if is_already_exited(&err) {
            ProcessError::AlreadyExited(pid)
        } else {
            ProcessError::SignalFailed { pid, source: err }
        }
    }
}

/// True for the OS errors that mean "nothing left to stop".
pub fn is_already_exited(err: &io::Error) -> bool {
    // std synthesizes this (no errno) for kill on a reaped child.
    if err.raw_os_error().is_none() && err.kind() == io::ErrorKind::InvalidInput {
        return true;
    }

    #[cfg(unix)]
    {
        matches!(err.raw_os_error(), Some(code) if code == libc::ESRCH || code == libc::ECHILD)
    }

    #[cfg(not(unix))]
    {
        false
    }
}
