//! eframe::App implementation for PanelApp
//!
//! Contains the main update loop that runs every frame.

use super::app::PanelApp;
use super::theme::apply_theme;
use eframe::egui;

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pick up finished git jobs from the worker thread
        self.poll_git();

        // Notice a server that crashed since the last click
        self.poll_server();

        apply_theme(ctx);
        self.render(ctx);

        // Keep polling even when the user is idle
        ctx.request_repaint_after(std::time::Duration::from_millis(500));
    }
}
