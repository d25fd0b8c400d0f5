//! Key/value preference storage

use std::collections::BTreeMap;

use anyhow::Result;

/// String preferences keyed by name.
///
/// Missing keys read as the empty string.
pub trait PreferencesStore {
    fn get(&self, key: &str) -> String;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// All stored entries, sorted by key.
    fn entries(&self) -> Vec<(String, String)>;
}

/// Non-persistent store, used by tests and as a fallback when the
/// preference file cannot be read.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for MemoryPreferences {
    fn get(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
