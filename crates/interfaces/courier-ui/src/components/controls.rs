use crate::theme::*;
use crate::utils::{cmd_button, section_label};
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

use courier_app_core::{PresetButtonVm, TriggerVm};
use courier_config::{MAX_FAIL_RATE, MIN_FAIL_RATE};
use courier_core::{EventType, ScenarioPreset, SimulationRequest};

#[derive(Default)]
pub struct ControlsResponse {
    pub preset: Option<ScenarioPreset>,
    pub edited: Option<SimulationRequest>,
    pub trigger: bool,
    pub reset: bool,
    pub toggle_tooltips: bool,
}

pub struct ControlsInput<'v> {
    pub request: SimulationRequest,
    pub tooltips_enabled: bool,
    pub trigger: &'v TriggerVm,
    pub presets: &'v [PresetButtonVm],
}

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, input: ControlsInput<'_>) -> ControlsResponse {
    let mut resp = ControlsResponse::default();
    let mut request = input.request;
    let editable = input.trigger.enabled;

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        padding: length(10.0),
        gap: length(8.0),
        size: taffy::Size {
            width: percent(1.),
            height: percent(1.),
        },
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(COL_BG_DARK)
            .with_border_color(COL_BORDER)
            .with_border_width(1.0),
        |tui| {
            tui.ui(|ui| section_label(ui, "SCENARIOS"));

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                flex_wrap: taffy::FlexWrap::Wrap,
                gap: length(4.0),
                size: taffy::Size {
                    width: percent(1.),
                    height: auto(),
                },
                ..Default::default()
            })
            .add(|tui| {
                for preset in input.presets {
                    let variant = if preset.active { "selected" } else { "outline" };
                    let clicked = tui
                        .ui(|ui| {
                            let btn = cmd_button(ui, preset.title, variant, editable);
                            if input.tooltips_enabled {
                                btn.on_hover_text(preset.description)
                            } else {
                                btn
                            }
                        })
                        .clicked();
                    if clicked {
                        resp.preset = Some(preset.preset);
                    }
                }
            });

            tui.separator();
            tui.ui(|ui| section_label(ui, "EVENT"));
            tui.ui(|ui| {
                ui.add_enabled_ui(editable, |ui| {
                    egui::ComboBox::from_id_salt("event-type")
                        .selected_text(request.event_type.as_str())
                        .width(200.0)
                        .show_ui(ui, |ui| {
                            for event_type in EventType::ALL {
                                ui.selectable_value(
                                    &mut request.event_type,
                                    event_type,
                                    event_type.as_str(),
                                );
                            }
                        });
                });
            });

            tui.ui(|ui| section_label(ui, "FAILURE RATE"));
            tui.ui(|ui| {
                ui.add_enabled(
                    editable,
                    egui::Slider::new(&mut request.fail_rate, MIN_FAIL_RATE..=MAX_FAIL_RATE)
                        .suffix("%"),
                );
            });

            tui.ui(|ui| section_label(ui, "RECIPIENT"));
            tui.ui(|ui| {
                ui.add_enabled_ui(editable, |ui| {
                    ui.checkbox(&mut request.do_not_disturb, "Do Not Disturb");
                    ui.checkbox(&mut request.recipient_online, "Online");
                    ui.checkbox(&mut request.slow_mode, "Slow mode");
                });
            });

            tui.separator();

            let trigger = input.trigger;
            resp.trigger = tui
                .ui(|ui| cmd_button(ui, trigger.label, "primary", trigger.enabled))
                .clicked();

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                justify_content: Some(taffy::JustifyContent::SpaceBetween),
                align_items: Some(taffy::AlignItems::Center),
                ..Default::default()
            })
            .add(|tui| {
                resp.reset = tui.ui(|ui| cmd_button(ui, "RESET", "outline", true)).clicked();

                let mut tooltips = input.tooltips_enabled;
                if tui.ui_add(egui::Checkbox::new(&mut tooltips, "Tooltips")).changed() {
                    resp.toggle_tooltips = true;
                }
            });
        },
    );

    if request != input.request {
        resp.edited = Some(request);
    }
    resp
}
