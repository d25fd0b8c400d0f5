//! Shared test utilities for process supervision tests

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use sitedeck::process::{is_pid_alive, CommandLauncher, Supervisor};
use tempfile::TempDir;

/// Creates a temporary site directory with a placeholder config
pub fn create_site_dir() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(temp_dir.path().join("hugo.toml"), "title = \"test\"\n")
        .expect("Failed to write site config");
    temp_dir
}

/// Supervisor whose "server" is a long sleep
pub fn sleeping_supervisor() -> Supervisor {
    Supervisor::new(CommandLauncher::new("sleep", ["60"]))
}

/// Polls until `pid` is gone or the timeout elapses
pub fn wait_until_dead(pid: u32, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if !is_pid_alive(pid).unwrap_or(false) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    false
}

/// Sends SIGKILL behind the supervisor's back and gives the kernel time to
/// deliver it. The child stays a zombie until the supervisor reaps it.
pub fn kill_externally(pid: u32) {
    let rc = unsafe { libc::kill(pid as i32, libc::SIGKILL) };
    assert_eq!(rc, 0, "kill({}) failed", pid);
    std::thread::sleep(Duration::from_millis(50));
}

/// Working directory of a live process, read from procfs
#[cfg(target_os = "linux")]
pub fn process_cwd(pid: u32) -> PathBuf {
    std::fs::read_link(format!("/proc/{}/cwd", pid)).expect("read /proc/<pid>/cwd")
}

#[cfg(target_os = "linux")]
pub fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().expect("canonicalize")
}
