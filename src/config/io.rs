//! Preference file I/O

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use fs2::FileExt;

use super::store::PreferencesStore;

/// Preferences persisted as a flat TOML table.
///
/// Every `set` rewrites the file so values survive a crash or a second
/// instance reading them.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Get the global config directory path (~/.sitedeck/)
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sitedeck")
    }

    /// Get the global preference file path (~/.sitedeck/preferences.toml)
    pub fn global_path() -> PathBuf {
        Self::global_dir().join("preferences.toml")
    }

    /// Load preferences from `path`. A missing file yields an empty store;
    /// it is created on the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences: {}", path.display()))?;

        let values: BTreeMap<String, String> = toml::from_str(&content)
            .with_context(|| format!("Failed to parse preferences: {}", path.display()))?;

        Ok(Self { path, values })
    }

    /// Write the store with an exclusive lock and an atomic rename.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let content =
            toml::to_string_pretty(&self.values).context("Failed to serialize preferences")?;

        // Lock a sibling file; the preference file itself gets replaced by rename.
        let lock_path = self.path.with_extension("toml.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        lock_file
            .lock_exclusive()
            .context("Failed to acquire preferences lock")?;

        let temp_path = self.path.with_extension("toml.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .context("Failed to write preferences")?;

        temp_file
            .sync_all()
            .context("Failed to sync preferences file")?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to rename preferences file: {}", self.path.display()))?;

        Ok(())
    }
}

impl PreferencesStore for FilePreferences {
    fn get(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
