//! Lifecycle supervisor for the preview server child process.
//!
//! The supervisor owns at most one child. The GUI drives it through a single
//! start/stop toggle, so every decision re-probes the child first: it may have
//! crashed since the last frame.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Child;
use std::sync::mpsc;

use tracing::{debug, info, warn};

use super::error::is_already_exited;
use super::launcher::ServerLauncher;
use super::liveness::is_pid_alive;
use super::ProcessError;

/// Observable state of the preview server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Stopped,
    Running,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerState::Stopped => write!(f, "stopped"),
            ServerState::Running => write!(f, "running"),
        }
    }
}

/// Whether the supervisor is tracking a child at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorPhase {
    NoProcess,
    Running,
}

/// Identity of the tracked child.
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    pub pid: u32,
    pub working_dir: PathBuf,
}

/// Receives a notification whenever the server state changes.
pub trait StateObserver: Send {
    fn state_changed(&self, state: ServerState);
}

impl StateObserver for mpsc::Sender<ServerState> {
    fn state_changed(&self, state: ServerState) {
        // The receiving side going away just means nobody is listening anymore.
        let _ = self.send(state);
    }
}

struct FnObserver<F>(F);

impl<F> StateObserver for FnObserver<F>
where
    F: Fn(ServerState) + Send,
{
    fn state_changed(&self, state: ServerState) {
        (self.0)(state)
    }
}

struct TrackedChild {
    child: Child,
    handle: ProcessHandle,
}

/// Owns the lifecycle of a single preview server process.
pub struct Supervisor {
    launcher: Box<dyn ServerLauncher>,
    tracked: Option<TrackedChild>,
    observers: Vec<Box<dyn StateObserver>>,
    last_notified: Option<ServerState>,
}

impl Supervisor {
    pub fn new(launcher: impl ServerLauncher + 'static) -> Self {
        Self {
            launcher: Box::new(launcher),
            tracked: None,
            observers: Vec::new(),
            last_notified: None,
        }
    }

    /// Replace the launcher used for future spawns. A running child is left alone.
    pub fn set_launcher(&mut self, launcher: impl ServerLauncher + 'static) {
        self.launcher = Box::new(launcher);
    }

    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Subscribe a closure to state changes.
    pub fn on_change(&mut self, f: impl Fn(ServerState) + Send + 'static) {
        self.subscribe(FnObserver(f));
    }

    pub fn phase(&self) -> SupervisorPhase {
        if self.tracked.is_some() {
            SupervisorPhase::Running
        } else {
            SupervisorPhase::NoProcess
        }
    }

    pub fn handle(&self) -> Option<&ProcessHandle> {
        self.tracked.as_ref().map(|t| &t.handle)
    }

    pub fn pid(&self) -> Option<u32> {
        self.handle().map(|h| h.pid)
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.handle().map(|h| h.working_dir.as_path())
    }

    /// Current state, probing the tracked child.
    ///
    /// A probe error is reported as `Running`: the child is still tracked and
    /// nothing proved it gone.
    pub fn state(&mut self) -> ServerState {
        match self.tracked_alive() {
            Ok(true) => ServerState::Running,
            Ok(false) => ServerState::Stopped,
            Err(e) => {
                warn!("Failed to probe preview server: {}", e);
                ServerState::Running
            }
        }
    }

    /// Re-probe and notify observers if the child died on its own.
    pub fn poll(&mut self) -> ServerState {
        let state = self.state();
        self.notify(state);
        state
    }

    /// Spawn the server in `dir`. Fails if a child is already tracked.
    pub fn start(&mut self, dir: &Path) -> Result<(), ProcessError> {
        if let Some(pid) = self.pid() {
            return Err(ProcessError::AlreadyRunning(pid));
        }
        self.spawn(dir)
    }

    /// Make sure a server is running: no-op if alive, respawn if it died.
    pub fn ensure_running(&mut self, dir: &Path) -> Result<(), ProcessError> {
        if self.tracked_alive()? {
            debug!(pid = ?self.pid(), "Preview server already running");
            return Ok(());
        }

        if let Some(old) = self.tracked.take() {
            info!(
                pid = old.handle.pid,
                dir = %old.handle.working_dir.display(),
                "Preview server exited, restarting"
            );
            reap(old);
        }

        self.spawn(dir)
    }

    /// Kill the tracked child and block until the OS confirms it exited.
    ///
    /// No-op without a tracked child. A child that already exited counts as
    /// stopped.
    pub fn stop(&mut self) -> Result<(), ProcessError> {
        let Some(mut tracked) = self.tracked.take() else {
            return Ok(());
        };
        let pid = tracked.handle.pid;

        if let Err(e) = tracked.child.kill() {
            match ProcessError::from_signal(pid, e) {
                ProcessError::AlreadyExited(_) => {
                    debug!(pid, "Preview server already gone before kill");
                }
                err => {
                    self.tracked = Some(tracked);
                    return Err(err);
                }
            }
        }

        let waited = tracked.child.wait();
        self.notify(ServerState::Stopped);

        match waited {
            Ok(status) => {
                info!(pid, %status, "Preview server stopped");
                Ok(())
            }
            Err(e) if is_already_exited(&e) => {
                warn!(pid, "Preview server was reaped elsewhere: {}", e);
                Ok(())
            }
            Err(e) => Err(ProcessError::SignalFailed { pid, source: e }),
        }
    }

    /// Single-button behaviour: stop a live server, otherwise (re)start it.
    pub fn toggle(&mut self, dir: &Path) -> Result<ServerState, ProcessError> {
        if self.tracked_alive()? {
            self.stop()?;
            Ok(ServerState::Stopped)
        } else {
            self.ensure_running(dir)?;
            Ok(ServerState::Running)
        }
    }

    fn spawn(&mut self, dir: &Path) -> Result<(), ProcessError> {
        let mut cmd = self.launcher.command(dir);
        cmd.current_dir(dir);

        let child = cmd.spawn().map_err(|source| ProcessError::SpawnFailed {
            command: self.launcher.describe(),
            source,
        })?;

        let handle = ProcessHandle {
            pid: child.id(),
            working_dir: dir.to_path_buf(),
        };
        info!(
            pid = handle.pid,
            dir = %dir.display(),
            "Started preview server: {}",
            self.launcher.describe()
        );

        self.tracked = Some(TrackedChild { child, handle });
        self.notify(ServerState::Running);
        Ok(())
    }

    /// Whether the tracked child is alive. `try_wait` reaps a zombie first so
    /// the pid probe only ever sees a live process or nothing.
    fn tracked_alive(&mut self) -> Result<bool, ProcessError> {
        let Some(tracked) = self.tracked.as_mut() else {
            return Ok(false);
        };
        let pid = tracked.handle.pid;

        match tracked.child.try_wait() {
            Ok(Some(status)) => {
                debug!(pid, %status, "Preview server has exited");
                return Ok(false);
            }
            Ok(None) => {}
            Err(e) if is_already_exited(&e) => return Ok(false),
            Err(e) => return Err(ProcessError::SignalFailed { pid, source: e }),
        }

        match is_pid_alive(pid) {
            Err(ProcessError::Unsupported) => Ok(true),
            other => other,
        }
    }

    fn notify(&mut self, state: ServerState) {
        if self.last_notified == Some(state) {
            return;
        }
        self.last_notified = Some(state);
        for observer in &self.observers {
            observer.state_changed(state);
        }
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("Failed to stop preview server on shutdown: {}", e);
        }
    }
}

fn reap(mut old: TrackedChild) {
    if let Err(e) = old.child.try_wait() {
        debug!(pid = old.handle.pid, "Reaping old preview server failed: {}", e);
    }
}
