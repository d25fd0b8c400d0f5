//! Project configuration and preference storage

mod io;
mod store;

pub use io::FilePreferences;
pub use store::{MemoryPreferences, PreferencesStore};

use std::path::PathBuf;

use anyhow::Result;

use crate::git::{remote_url, Credentials, GitError};
use crate::process::{HugoLauncher, DEFAULT_SERVER_BINARY, DEFAULT_SERVER_PORT};

/// Preference key names.
pub mod keys {
    pub const PROJECT_DIRECTORY: &str = "ProjectDirectory";
    pub const GIT_HOST: &str = "GitHost";
    pub const GIT_PORT: &str = "GitPort";
    pub const GIT_USER: &str = "GitUser";
    pub const GIT_REPOSITORY: &str = "GitRepository";
    pub const GIT_KEY: &str = "GitKey";
    pub const SERVER_BINARY: &str = "ServerBinary";
    pub const SERVER_PORT: &str = "ServerPort";

    pub const ALL: [&str; 8] = [
        PROJECT_DIRECTORY,
        GIT_HOST,
        GIT_PORT,
        GIT_USER,
        GIT_REPOSITORY,
        GIT_KEY,
        SERVER_BINARY,
        SERVER_PORT,
    ];
}

/// Typed view over the preference keys a project uses.
///
/// Values are plain strings, exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    pub directory: String,
    pub git_host: String,
    pub git_port: String,
    pub git_user: String,
    pub git_repository: String,
    pub git_key: String,
    pub server_binary: String,
    pub server_port: String,
}

impl ProjectConfig {
    /// Read every project key from `store`.
    pub fn load(store: &dyn PreferencesStore) -> Self {
        Self {
            directory: store.get(keys::PROJECT_DIRECTORY),
            git_host: store.get(keys::GIT_HOST),
            git_port: store.get(keys::GIT_PORT),
            git_user: store.get(keys::GIT_USER),
            git_repository: store.get(keys::GIT_REPOSITORY),
            git_key: store.get(keys::GIT_KEY),
            server_binary: store.get(keys::SERVER_BINARY),
            server_port: store.get(keys::SERVER_PORT),
        }
    }

    /// Write every project key back to `store`.
    pub fn save(&self, store: &mut dyn PreferencesStore) -> Result<()> {
        for key in keys::ALL {
            if let Some(value) = self.get(key) {
                store.set(key, value)?;
            }
        }
        Ok(())
    }

    /// Value for a preference key, `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            keys::PROJECT_DIRECTORY => &self.directory,
            keys::GIT_HOST => &self.git_host,
            keys::GIT_PORT => &self.git_port,
            keys::GIT_USER => &self.git_user,
            keys::GIT_REPOSITORY => &self.git_repository,
            keys::GIT_KEY => &self.git_key,
            keys::SERVER_BINARY => &self.server_binary,
            keys::SERVER_PORT => &self.server_port,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Project directory, if one is set.
    pub fn project_dir(&self) -> Option<PathBuf> {
        let dir = self.directory.trim();
        if dir.is_empty() {
            None
        } else {
            Some(PathBuf::from(dir))
        }
    }

    /// Preview server port; falls back to the default when unset or unparsable.
    pub fn port(&self) -> u16 {
        self.server_port
            .trim()
            .parse()
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn launcher(&self) -> HugoLauncher {
        let binary = match self.server_binary.trim() {
            "" => DEFAULT_SERVER_BINARY,
            b => b,
        };
        HugoLauncher::new(binary, self.port())
    }

    /// SSH URL of the configured remote.
    pub fn remote_url(&self) -> Result<String, GitError> {
        remote_url(
            &self.git_user,
            &self.git_host,
            &self.git_port,
            &self.git_repository,
        )
    }

    pub fn credentials(&self) -> Credentials {
        let key = self.git_key.trim();
        Credentials {
            user: self.git_user.trim().to_string(),
            key_path: (!key.is_empty()).then(|| PathBuf::from(key)),
        }
    }
}
