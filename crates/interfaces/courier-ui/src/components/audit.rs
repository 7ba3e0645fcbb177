use crate::theme::*;
use crate::utils::section_label;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

use courier_app_core::render::AUDIT_LOG_SINK;
use courier_app_core::AuditLineVm;

pub const SINK_KEY: &str = AUDIT_LOG_SINK;

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, lines: &[AuditLineVm]) {
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        padding: length(10.0),
        gap: length(6.0),
        flex_grow: 1.0,
        flex_basis: length(0.0),
        min_size: taffy::Size {
            width: percent(1.),
            height: length(120.0),
        },
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(COL_BG_DARK)
            .with_border_color(COL_BORDER)
            .with_border_width(1.0),
        |tui| {
            tui.ui(|ui| section_label(ui, "AUDIT LOG"));

            tui.style(taffy::Style {
                flex_grow: 1.0,
                size: percent(1.),
                ..Default::default()
            })
            .ui(|ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if lines.is_empty() {
                            ui.colored_label(COL_TEXT_DIM, "Waiting for events...");
                        }
                        for line in lines {
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(format!("[{}]", line.time))
                                        .monospace()
                                        .color(COL_TEXT_DIM),
                                );
                                ui.label(
                                    egui::RichText::new(&line.text)
                                        .monospace()
                                        .color(status_color(line.class.as_str())),
                                );
                            });
                        }
                    });
            });
        },
    );
}
