//! Desktop control panel
//!
//! A single egui window: project and SSH key pickers, git remote settings with
//! clone/pull/push, and one button that starts or stops the preview server.
//! The panel subscribes to the server supervisor and redraws from its
//! notifications.

pub mod app;
mod app_eframe;
mod app_render;
pub mod desktop;
pub mod git_worker;
pub mod runner;
pub mod theme;

pub use app::PanelApp;
pub use git_worker::{GitAction, GitJob, GitOutcome};
pub use runner::run_gui;
