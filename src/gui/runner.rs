//! GUI runner - launches the control panel window

use anyhow::Result;
use eframe::egui;
use std::path::PathBuf;
use tracing::{info, warn};

use super::app::PanelApp;
use crate::config::{FilePreferences, MemoryPreferences, PreferencesStore};

/// Run the control panel until its window is closed.
///
/// The preview server, if running, is stopped when the app is dropped.
pub fn run_gui(prefs_path: Option<PathBuf>) -> Result<()> {
    let path = prefs_path.unwrap_or_else(FilePreferences::global_path);

    let prefs: Box<dyn PreferencesStore> = match FilePreferences::open(&path) {
        Ok(prefs) => {
            info!("Using preferences at {}", path.display());
            Box::new(prefs)
        }
        Err(e) => {
            warn!(
                "[sitedeck] Failed to load preferences ({}): {:#}. Changes will not be saved.",
                path.display(),
                e
            );
            Box::new(MemoryPreferences::new())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("sitedeck")
            .with_inner_size([500.0, 560.0])
            .with_min_inner_size([420.0, 420.0])
            .with_resizable(true),
        centered: true,
        ..Default::default()
    };

    let app = PanelApp::new(prefs);

    eframe::run_native("sitedeck", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))?;

    Ok(())
}
