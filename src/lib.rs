//! sitedeck - a desktop control panel for a static site
//!
//! Point it at a site directory, configure an SSH git remote, then clone, pull,
//! and push from one window. A single button starts or stops a local preview
//! server (`hugo serve` by default).
//!
//! ## Modules
//!
//! - [`process`]: supervision of the preview server child process
//! - [`git`]: clone/pull/commit/push through the `git` CLI
//! - [`config`]: string preferences persisted as TOML
//! - [`gui`]: the eframe/egui panel

pub mod config;
pub mod domain;
pub mod git;
pub mod gui;
pub mod process;

pub use domain::*;
