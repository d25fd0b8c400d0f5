//! Builders for the preview server command line.

use std::path::Path;
use std::process::{Command, Stdio};

/// Default port the preview server listens on.
pub const DEFAULT_SERVER_PORT: u16 = 34040;

/// Default preview server binary.
pub const DEFAULT_SERVER_BINARY: &str = "hugo";

/// Produces the command that runs the preview server for a site directory.
pub trait ServerLauncher: Send {
    /// Build the command. The supervisor sets the working directory itself.
    fn command(&self, site_dir: &Path) -> Command;

    /// Human-readable command line, used in logs and errors.
    fn describe(&self) -> String;
}

/// Runs `hugo serve` with live reload on a fixed port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HugoLauncher {
    pub binary: String,
    pub port: u16,
}

impl HugoLauncher {
    pub fn new(binary: impl Into<String>, port: u16) -> Self {
        Self {
            binary: binary.into(),
            port,
        }
    }

    /// URL the preview is reachable at once the server is up.
    pub fn preview_url(&self) -> String {
        preview_url(self.port)
    }

    fn args(&self, site_dir: &Path) -> Vec<String> {
        vec![
            "serve".to_string(),
            "-p".to_string(),
            self.port.to_string(),
            "-s".to_string(),
            site_dir.display().to_string(),
            "-w".to_string(),
        ]
    }
}

impl Default for HugoLauncher {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_BINARY, DEFAULT_SERVER_PORT)
    }
}

impl ServerLauncher for HugoLauncher {
    fn command(&self, site_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args(site_dir));
        quiet(&mut cmd);
        cmd
    }

    fn describe(&self) -> String {
        format!("{} serve -p {}", self.binary, self.port)
    }
}

/// Runs an arbitrary program with fixed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLauncher {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLauncher {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl ServerLauncher for CommandLauncher {
    fn command(&self, _site_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        quiet(&mut cmd);
        cmd
    }

    fn describe(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Local URL for a preview server on `port`.
pub fn preview_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

// Nobody drains the child's output; a full pipe would block it.
fn quiet(cmd: &mut Command) {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
}
