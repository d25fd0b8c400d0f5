//! Panel layout
//!
//! Project and key pickers on top, git settings and actions in the middle,
//! the server toggle and preview links below, activity log at the bottom.

use eframe::egui::{self, RichText};

use super::app::PanelApp;
use super::desktop::{open_in_desktop, pick_folder, pick_key_file};
use super::git_worker::GitAction;
use super::theme::{
    ACCENT_CYAN, ACCENT_GREEN, ACCENT_RED, ACCENT_YELLOW, BG_SECONDARY, TEXT_DIM, TEXT_MUTED,
    TEXT_PRIMARY,
};
use crate::process::ServerState;

impl PanelApp {
    pub(crate) fn render(&mut self, ctx: &egui::Context) {
        self.render_activity_log(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            self.render_project_section(ui);
            ui.separator();
            self.render_git_section(ui);
            ui.separator();
            self.render_server_section(ui);
        });
    }

    fn render_project_section(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;

        egui::Grid::new("project_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Directory").color(TEXT_DIM));
                changed |= text_field(ui, &mut self.config.directory);
                ui.end_row();

                ui.label(RichText::new("Key").color(TEXT_DIM));
                changed |= text_field(ui, &mut self.config.git_key);
                ui.end_row();
            });

        ui.horizontal(|ui| {
            if ui
                .button(RichText::new("📁 Set directory").color(TEXT_PRIMARY))
                .clicked()
            {
                if let Some(dir) = pick_folder(self.config.project_dir().as_deref()) {
                    self.config.directory = dir.display().to_string();
                    changed = true;
                }
            }
            if ui
                .button(RichText::new("🔑 Set key").color(TEXT_PRIMARY))
                .clicked()
            {
                if let Some(key) = pick_key_file() {
                    self.config.git_key = key.display().to_string();
                    changed = true;
                }
            }
        });

        if changed {
            self.persist_config();
        }
    }

    fn render_git_section(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;

        egui::Grid::new("git_grid")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                for (label, value) in [
                    ("Host", &mut self.config.git_host),
                    ("Port", &mut self.config.git_port),
                    ("User", &mut self.config.git_user),
                    ("Repository", &mut self.config.git_repository),
                ] {
                    ui.label(RichText::new(label).color(TEXT_DIM));
                    changed |= text_field(ui, value);
                    ui.end_row();
                }
            });

        if changed {
            self.persist_config();
        }

        let idle = self.git_busy.is_none();
        let cloned = self.is_repository();

        ui.horizontal(|ui| {
            let clone = ui.add_enabled(
                idle && !cloned,
                egui::Button::new(RichText::new("⎘ Clone").color(ACCENT_RED)),
            );
            if clone.clicked() {
                self.start_git(GitAction::Clone);
            }

            let pull = ui.add_enabled(
                idle && cloned,
                egui::Button::new(RichText::new("⬇ Pull").color(ACCENT_YELLOW)),
            );
            if pull.clicked() {
                self.start_git(GitAction::Pull);
            }

            let push = ui.add_enabled(
                idle && cloned,
                egui::Button::new(RichText::new("⬆ Push").color(ACCENT_RED)),
            );
            if push.clicked() {
                self.start_git(GitAction::Push);
            }

            if let Some(action) = self.git_busy {
                ui.spinner();
                ui.label(RichText::new(format!("{}...", action)).color(TEXT_MUTED));
            }
        });
    }

    fn render_server_section(&mut self, ui: &mut egui::Ui) {
        let (label, color) = match self.server_state {
            ServerState::Stopped => ("▶ Start server", ACCENT_GREEN),
            ServerState::Running => ("■ Stop server", ACCENT_RED),
        };

        if ui
            .add_sized(
                [ui.available_width(), 32.0],
                egui::Button::new(RichText::new(label).color(color).strong()),
            )
            .clicked()
        {
            self.toggle_server();
        }

        ui.horizontal(|ui| {
            let url = self.config.launcher().preview_url();
            ui.hyperlink_to("Open in browser", url);
            ui.add_space(12.0);
            if ui
                .button(RichText::new("Open folder").color(ACCENT_CYAN))
                .clicked()
            {
                match self.config.project_dir() {
                    Some(dir) => open_in_desktop(&dir.display().to_string()),
                    None => self.log(crate::domain::LogEvent::error(
                        "Set a project directory first",
                    )),
                }
            }
            if let Some(pid) = self.supervisor.pid() {
                ui.label(RichText::new(format!("pid {}", pid)).small().color(TEXT_MUTED));
            }
        });
    }

    fn render_activity_log(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("activity_log")
            .resizable(true)
            .default_height(140.0)
            .frame(egui::Frame::NONE.fill(BG_SECONDARY).inner_margin(6.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for event in &self.logs {
                            let color = if event.is_error() { ACCENT_RED } else { TEXT_DIM };
                            let line = ui.label(
                                RichText::new(event.display_line())
                                    .small()
                                    .monospace()
                                    .color(color),
                            );
                            if let Some(content) = &event.content {
                                let _ = line.on_hover_text(content.as_str());
                            }
                        }
                    });
            });
    }
}

/// Single-line field; reports a commit when focus leaves or Enter is pressed.
fn text_field(ui: &mut egui::Ui, value: &mut String) -> bool {
    let response = ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY));
    response.lost_focus()
}
