//! GUI Theme: "Terminal Phosphor" - Retro CRT monitor aesthetic
//!
//! Color constants for the sitedeck panel, inspired by vintage CRT monitors.

use eframe::egui::{self, Color32, Stroke};

// ═══════════════════════════════════════════════════════════════════════════
// BACKGROUNDS
// ═══════════════════════════════════════════════════════════════════════════

/// Background: Deep charcoal with subtle blue tint (like a powered-off CRT)
pub const BG_PRIMARY: Color32 = Color32::from_rgb(18, 20, 24);
/// Secondary background for panels
pub const BG_SECONDARY: Color32 = Color32::from_rgb(24, 28, 34);
/// Accent highlight background
pub const BG_HIGHLIGHT: Color32 = Color32::from_rgb(32, 40, 52);

// ═══════════════════════════════════════════════════════════════════════════
// TEXT COLORS
// ═══════════════════════════════════════════════════════════════════════════

/// Primary text: Warm amber phosphor glow
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(255, 176, 0);
/// Secondary text: Dimmed amber
pub const TEXT_DIM: Color32 = Color32::from_rgb(180, 130, 50);
/// Muted text
pub const TEXT_MUTED: Color32 = Color32::from_rgb(100, 85, 60);

// ═══════════════════════════════════════════════════════════════════════════
// ACCENT COLORS
// ═══════════════════════════════════════════════════════════════════════════

pub const ACCENT_CYAN: Color32 = Color32::from_rgb(0, 255, 200);
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(80, 255, 120);
pub const ACCENT_RED: Color32 = Color32::from_rgb(255, 80, 80);
pub const ACCENT_YELLOW: Color32 = Color32::from_rgb(255, 200, 50);

/// Apply the dark theme to the egui context.
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals.dark_mode = true;
    style.visuals.panel_fill = BG_PRIMARY;
    style.visuals.window_fill = BG_PRIMARY;
    style.visuals.extreme_bg_color = BG_SECONDARY;
    style.visuals.widgets.noninteractive.bg_fill = BG_SECONDARY;
    style.visuals.widgets.inactive.bg_fill = BG_SECONDARY;
    style.visuals.widgets.hovered.bg_fill = BG_HIGHLIGHT;
    style.visuals.widgets.active.bg_fill = BG_HIGHLIGHT;
    style.visuals.selection.bg_fill = BG_HIGHLIGHT;
    style.visuals.selection.stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.hyperlink_color = ACCENT_CYAN;
    ctx.set_style(style);
}
