//! Signal-zero liveness probe.

use super::ProcessError;

/// Check whether `pid` still refers to a running process.
///
/// Sends signal 0, which performs the existence and permission checks of
/// `kill(2)` without delivering anything. A process owned by another user
/// (`EPERM`) is reported alive.
#[cfg(unix)]
pub fn is_alive(pid: i32) -> Result<bool, ProcessError> {
    if pid <= 0 {
        return Err(ProcessError::InvalidArgument(pid.into()));
    }

    // SAFETY: kill with sig=0 never sends a signal; it only checks PID existence.
    let rc = unsafe { libc::kill(pid, 0) };
    if rc == 0 {
        return Ok(true);
    }

    classify_probe_error(pid, std::io::Error::last_os_error())
}

/// Map a failed signal-zero probe to alive / dead / error.
#[cfg(unix)]
fn classify_probe_error(pid: i32, err: std::io::Error) -> Result<bool, ProcessError> {
    match err.raw_os_error() {
        Some(code) if code == libc::ESRCH => Ok(false),
        Some(code) if code == libc::EPERM => Ok(true),
        _ => Err(ProcessError::SignalFailed {
            pid: pid as u32,
            source: err,
        }),
    }
}

#[cfg(not(unix))]
pub fn is_alive(pid: i32) -> Result<bool, ProcessError> {
    if pid <= 0 {
        return Err(ProcessError::InvalidArgument(pid.into()));
    }
    Err(ProcessError::Unsupported)
}

/// [`is_alive`] for pids as std hands them out (`Child::id`).
pub fn is_pid_alive(pid: u32) -> Result<bool, ProcessError> {
    let pid = i32::try_from(pid).map_err(|_| ProcessError::InvalidArgument(pid.into()))?;
    is_alive(pid)
}
