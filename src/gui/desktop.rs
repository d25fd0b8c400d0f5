//! Desktop integration: opening folders/URLs and native file pickers

use std::path::{Path, PathBuf};

/// Open a folder or URL with the platform's default handler.
pub fn open_in_desktop(target: &str) {
    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(target).spawn();

    #[cfg(target_os = "linux")]
    let result = std::process::Command::new("xdg-open").arg(target).spawn();

    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", "", target])
        .spawn();

    #[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
    if let Err(e) = result {
        tracing::warn!("Failed to open {}: {}", target, e);
    }
}

/// Ask the user for a project directory, starting at `current` when set.
pub fn pick_folder(current: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Project directory");
    if let Some(dir) = current.filter(|d| d.is_dir()) {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_folder()
}

/// Ask the user for an SSH private key file.
pub fn pick_key_file() -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("SSH private key");
    if let Some(ssh_dir) = dirs::home_dir().map(|h| h.join(".ssh")).filter(|d| d.is_dir()) {
        dialog = dialog.set_directory(ssh_dir);
    }
    dialog.pick_file()
}
