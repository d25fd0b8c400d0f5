//! Control panel state
//!
//! Owns the preview server supervisor, the editable project settings, and the
//! activity log. Rendering lives in `app_render.rs`, the frame loop in
//! `app_eframe.rs`.

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::git_worker::{spawn_git_job, GitAction, GitJob, GitOutcome};
use crate::config::{keys, PreferencesStore, ProjectConfig};
use crate::domain::{truncate_log, LogEvent};
use crate::git::{is_repository, DEFAULT_COMMIT_MESSAGE};
use crate::process::{ServerState, Supervisor};

/// How many activity entries to keep
const MAX_LOG_ENTRIES: usize = 200;

/// How often the server is re-probed so a crash shows up without a click
const SERVER_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct PanelApp {
    prefs: Box<dyn PreferencesStore>,
    /// Edit buffer bound to the text fields
    pub(crate) config: ProjectConfig,
    /// Last values written to the store
    saved: ProjectConfig,
    pub(crate) supervisor: Supervisor,
    state_rx: Receiver<ServerState>,
    pub(crate) server_state: ServerState,
    git_rx: Option<Receiver<GitOutcome>>,
    pub(crate) git_busy: Option<GitAction>,
    pub(crate) logs: Vec<LogEvent>,
    last_poll: Instant,
}

impl PanelApp {
    pub fn new(prefs: Box<dyn PreferencesStore>) -> Self {
        let config = ProjectConfig::load(prefs.as_ref());
        let mut supervisor = Supervisor::new(config.launcher());
        let (state_tx, state_rx) = mpsc::channel();
        supervisor.subscribe(state_tx);

        Self {
            prefs,
            saved: config.clone(),
            config,
            supervisor,
            state_rx,
            server_state: ServerState::Stopped,
            git_rx: None,
            git_busy: None,
            logs: vec![LogEvent::system("Control panel ready")],
            last_poll: Instant::now(),
        }
    }

    pub(crate) fn log(&mut self, event: LogEvent) {
        if event.is_error() {
            warn!("{}", event.summary);
        }
        self.logs.push(event);
        truncate_log(&mut self.logs, MAX_LOG_ENTRIES);
    }

    /// Write edited fields that differ from what the store holds.
    pub(crate) fn persist_config(&mut self) {
        for key in keys::ALL {
            let (Some(new), Some(old)) = (self.config.get(key), self.saved.get(key)) else {
                continue;
            };
            if new == old {
                continue;
            }
            let new = new.to_string();
            match self.prefs.set(key, &new) {
                Ok(()) => {
                    info!("Preference {} updated", key);
                    self.log(LogEvent::config(format!("{} set to \"{}\"", key, new)));
                }
                Err(e) => {
                    self.log(LogEvent::error(format!("Failed to save {}: {:#}", key, e)));
                    return;
                }
            }
        }
        self.saved = self.config.clone();
    }

    /// Whether the project directory already holds a clone.
    pub(crate) fn is_repository(&self) -> bool {
        self.config
            .project_dir()
            .is_some_and(|dir| is_repository(&dir))
    }

    /// The start/stop button: stop a live server, (re)start otherwise.
    pub(crate) fn toggle_server(&mut self) {
        let Some(dir) = self.config.project_dir() else {
            self.log(LogEvent::error("Set a project directory first"));
            return;
        };

        self.supervisor.set_launcher(self.config.launcher());
        match self.supervisor.toggle(&dir) {
            Ok(ServerState::Running) => {
                let pid = self.supervisor.pid().unwrap_or_default();
                self.log(LogEvent::server(format!(
                    "Server running (pid {}) at {}",
                    pid,
                    self.config.launcher().preview_url()
                )));
            }
            Ok(ServerState::Stopped) => self.log(LogEvent::server("Server stopped")),
            Err(e) => self.log(LogEvent::error(format!("Server: {}", e))),
        }
        self.drain_state_changes();
    }

    /// Re-probe the server periodically and pick up observer notifications.
    pub(crate) fn poll_server(&mut self) {
        if self.last_poll.elapsed() >= SERVER_POLL_INTERVAL {
            self.last_poll = Instant::now();
            let was = self.server_state;
            if self.supervisor.poll() == ServerState::Stopped && was == ServerState::Running {
                self.log(LogEvent::server("Server exited on its own"));
            }
        }
        self.drain_state_changes();
    }

    fn drain_state_changes(&mut self) {
        while let Ok(state) = self.state_rx.try_recv() {
            self.server_state = state;
        }
    }

    pub(crate) fn start_git(&mut self, action: GitAction) {
        if self.git_busy.is_some() {
            return;
        }
        self.persist_config();

        let Some(dir) = self.config.project_dir() else {
            self.log(LogEvent::error("Set a project directory first"));
            return;
        };
        let remote = match self.config.remote_url() {
            Ok(url) => url,
            Err(e) => {
                self.log(LogEvent::error(format!("Cannot {}: {}", action, e)));
                return;
            }
        };

        self.log(LogEvent::git(format!("Starting {} ({})", action, remote)));
        self.git_rx = Some(spawn_git_job(GitJob {
            action,
            dir,
            remote,
            credentials: self.config.credentials(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }));
        self.git_busy = Some(action);
    }

    pub(crate) fn poll_git(&mut self) {
        let Some(rx) = &self.git_rx else {
            return;
        };

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                let action = self.git_busy.take();
                self.git_rx = None;
                self.log(LogEvent::error(format!(
                    "Git {} worker stopped unexpectedly",
                    action.map(|a| a.to_string()).unwrap_or_default()
                )));
                return;
            }
        };

        self.git_rx = None;
        self.git_busy = None;
        match outcome.result {
            Ok(summary) => self.log(LogEvent::git(summary)),
            Err(e) => self.log(
                LogEvent::error(format!("Git {} failed: {}", outcome.action, e))
                    .with_content(e.to_string()),
            ),
        }
    }
}

impl Drop for PanelApp {
    fn drop(&mut self) {
        self.persist_config();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryPreferences;
    use crate::domain::LogEventKind;

    fn app_with(prefs: MemoryPreferences) -> PanelApp {
        PanelApp::new(Box::new(prefs))
    }

    #[test]
    fn loads_config_from_store() {
        let mut prefs = MemoryPreferences::new();
        prefs.set(keys::GIT_HOST, "git.example.com").unwrap();
        let app = app_with(prefs);

        assert_eq!(app.config.git_host, "git.example.com");
        assert_eq!(app.server_state, ServerState::Stopped);
    }

    #[test]
    fn persist_only_logs_changes() {
        let mut app = app_with(MemoryPreferences::new());
        app.config.git_user = "deploy".to_string();
        app.persist_config();
        app.persist_config();

        let config_events = app
            .logs
            .iter()
            .filter(|e| e.kind == LogEventKind::Config)
            .count();
        assert_eq!(config_events, 1);
        assert_eq!(app.prefs.get(keys::GIT_USER), "deploy");
    }

    #[test]
    fn toggle_without_directory_is_an_error() {
        let mut app = app_with(MemoryPreferences::new());
        app.toggle_server();

        assert!(app.logs.last().unwrap().is_error());
        assert_eq!(app.server_state, ServerState::Stopped);
        assert!(app.supervisor.pid().is_none());
    }

    #[test]
    fn git_without_remote_settings_is_an_error() {
        let mut app = app_with(MemoryPreferences::new());
        app.config.directory = "/tmp/site".to_string();
        app.start_git(GitAction::Pull);

        assert!(app.git_busy.is_none());
        let last = app.logs.last().unwrap();
        assert!(last.is_error());
        assert!(last.summary.contains("GitHost"), "got {}", last.summary);
    }

    #[cfg(unix)]
    #[test]
    fn server_exit_is_noticed_by_polling() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut app = app_with(MemoryPreferences::new());
        app.config.directory = tmp.path().display().to_string();
        app.config.server_binary = "false".to_string();

        app.toggle_server();
        assert_eq!(app.server_state, ServerState::Running);

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.server_state == ServerState::Running && Instant::now() < deadline {
            app.last_poll = Instant::now() - SERVER_POLL_INTERVAL;
            app.poll_server();
            std::thread::sleep(Duration::from_millis(20));
        }

        assert_eq!(app.server_state, ServerState::Stopped);
        let exits = app
            .logs
            .iter()
            .filter(|e| e.summary == "Server exited on its own")
            .count();
        assert_eq!(exits, 1);
    }

    #[cfg(unix)]
    #[test]
    fn toggle_with_missing_binary_stays_stopped() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut app = app_with(MemoryPreferences::new());
        app.config.directory = tmp.path().display().to_string();
        app.config.server_binary = "sitedeck-no-such-hugo".to_string();

        app.toggle_server();
        assert_eq!(app.server_state, ServerState::Stopped);
        assert!(app.supervisor.pid().is_none());
        assert!(app.logs.last().unwrap().summary.contains("failed to spawn"));
    }
}
