//! Config command implementation

use anyhow::{Result, bail};

use sitedeck::config::{keys, PreferencesStore};

/// Print every known preference
pub fn show_command(prefs: &dyn PreferencesStore) -> Result<()> {
    for key in keys::ALL {
        let value = prefs.get(key);
        if value.is_empty() {
            println!("{:<18} (unset)", key);
        } else {
            println!("{:<18} {}", key, value);
        }
    }

    let unknown = unrecognized_entries(prefs);
    if !unknown.is_empty() {
        println!();
        println!("Unrecognized entries (ignored):");
        for (key, value) in unknown {
            println!("{:<18} {}", key, value);
        }
    }
    Ok(())
}

/// Stored entries that no setting reads, e.g. a key mistyped in the file.
fn unrecognized_entries(prefs: &dyn PreferencesStore) -> Vec<(String, String)> {
    prefs
        .entries()
        .into_iter()
        .filter(|(key, _)| !keys::ALL.contains(&key.as_str()))
        .collect()
}

/// Set a single preference
pub fn set_command(prefs: &mut dyn PreferencesStore, key: &str, value: &str) -> Result<()> {
    let Some(key) = keys::ALL.iter().find(|k| k.eq_ignore_ascii_case(key)) else {
        bail!("Unknown preference '{}'. Known keys: {}", key, keys::ALL.join(", "));
    };
    prefs.set(key, value)?;
    println!("{} = {}", key, value);
    Ok(())
}
