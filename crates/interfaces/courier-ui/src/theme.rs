use eframe::egui::{self, Color32, FontFamily, FontId, Stroke, TextStyle, Visuals};

// Slate palette
pub const COL_BG: Color32 = Color32::from_rgb(15, 23, 42);
pub const COL_BG_DARK: Color32 = Color32::from_rgb(11, 17, 32);
pub const COL_BORDER: Color32 = Color32::from_rgb(51, 65, 85);
pub const COL_TEXT: Color32 = Color32::from_rgb(241, 245, 249);
pub const COL_TEXT_DIM: Color32 = Color32::from_rgb(148, 163, 184);
pub const COL_ACCENT: Color32 = Color32::from_rgb(56, 189, 248);
pub const COL_WARN: Color32 = Color32::from_rgb(250, 204, 21);
pub const COL_DANGER: Color32 = Color32::from_rgb(239, 68, 68);
pub const COL_SUCCESS: Color32 = Color32::from_rgb(16, 185, 129);
pub const COL_PROCESSING: Color32 = Color32::from_rgb(245, 158, 11);

pub fn setup(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = COL_BG;
    visuals.panel_fill = COL_BG;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, COL_BORDER);
    visuals.widgets.inactive.bg_fill = COL_BG_DARK;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, COL_TEXT_DIM);

    visuals.widgets.hovered.bg_fill = COL_ACCENT.linear_multiply(0.15);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, COL_ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, COL_ACCENT);

    visuals.widgets.active.bg_fill = COL_ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, COL_BG);

    visuals.selection.bg_fill = COL_ACCENT.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, COL_ACCENT);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (TextStyle::Heading, FontId::new(14.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(12.0, FontFamily::Monospace)),
        (
            TextStyle::Monospace,
            FontId::new(11.0, FontFamily::Monospace),
        ),
        (TextStyle::Button, FontId::new(11.0, FontFamily::Monospace)),
        (TextStyle::Small, FontId::new(9.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.slider_width = 180.0;
    style.spacing.window_margin = egui::Margin::same(0);
    style.visuals.button_frame = true;

    ctx.set_style(style);
}

/// Colour for a node status class or audit class (`idle`, `processing`,
/// `success`, `failed`, `error`, `info`).
pub fn status_color(class: &str) -> Color32 {
    match class {
        "processing" => COL_PROCESSING,
        "success" => COL_SUCCESS,
        "failed" | "error" => COL_DANGER,
        "info" => COL_ACCENT,
        _ => COL_BORDER,
    }
}
