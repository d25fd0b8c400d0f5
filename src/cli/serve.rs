//! Serve command implementation

use anyhow::{Context, Result, bail};
use std::time::Duration;

use sitedeck::config::{PreferencesStore, ProjectConfig};
use sitedeck::process::{ServerState, Supervisor};

/// Start the preview server for the configured project and wait for it to exit.
pub fn serve_command(prefs: &dyn PreferencesStore) -> Result<()> {
    let config = ProjectConfig::load(prefs);
    let Some(dir) = config.project_dir() else {
        bail!("No project directory configured. Run `sitedeck config set ProjectDirectory <path>`");
    };

    let launcher = config.launcher();
    let url = launcher.preview_url();
    let mut supervisor = Supervisor::new(launcher);
    supervisor
        .start(&dir)
        .with_context(|| format!("Failed to start preview server in {}", dir.display()))?;

    println!(
        "Serving {} at {} (pid {})",
        dir.display(),
        url,
        supervisor.pid().unwrap_or_default()
    );

    while supervisor.poll() == ServerState::Running {
        std::thread::sleep(Duration::from_millis(500));
    }

    println!("Preview server exited.");
    Ok(())
}
