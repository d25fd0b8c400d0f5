//! Clone, pull, and push commands

use anyhow::{Context, Result};
use std::path::PathBuf;

use sitedeck::config::{PreferencesStore, ProjectConfig};
use sitedeck::git::{CliGitClient, Credentials, GitClient};

struct Target {
    dir: PathBuf,
    remote: String,
    credentials: Credentials,
}

fn target(prefs: &dyn PreferencesStore) -> Result<Target> {
    let config = ProjectConfig::load(prefs);
    let dir = config
        .project_dir()
        .context("No project directory configured")?;
    let remote = config.remote_url()?;
    Ok(Target {
        dir,
        remote,
        credentials: config.credentials(),
    })
}

/// Clone the configured remote into the project directory
pub fn clone_command(prefs: &dyn PreferencesStore) -> Result<()> {
    let t = target(prefs)?;
    CliGitClient::new().clone_repo(&t.dir, &t.remote, &t.credentials)?;
    println!("Cloned {} into {}", t.remote, t.dir.display());
    Ok(())
}

/// Pull the current branch from the configured remote
pub fn pull_command(prefs: &dyn PreferencesStore) -> Result<()> {
    let t = target(prefs)?;
    CliGitClient::new().pull(&t.dir, &t.remote, &t.credentials)?;
    println!("Pulled from {}", t.remote);
    Ok(())
}

/// Commit all changes and push them to the configured remote
pub fn push_command(prefs: &dyn PreferencesStore, message: &str) -> Result<()> {
    let t = target(prefs)?;
    let committed = CliGitClient::new().publish(&t.dir, &t.remote, &t.credentials, message)?;
    if committed {
        println!("Committed and pushed to {}", t.remote);
    } else {
        println!("Nothing to commit; pushed to {}", t.remote);
    }
    Ok(())
}
