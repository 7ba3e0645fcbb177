use crate::components::controls::{self, ControlsInput, ControlsResponse};
use crate::components::pipeline::{self, PipelineInput};
use crate::components::{audit, header};
use crate::surface::PulseSurface;
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

use courier_app_core::{ControlsState, DashboardVm, RenderTable};

/// Sink keys provided by the dashboard, checked against the render table at
/// startup.
pub fn sink_keys() -> Vec<String> {
    let mut keys = pipeline::sink_keys();
    keys.push(audit::SINK_KEY.to_string());
    keys
}

pub struct DashboardInput<'v> {
    pub vm: &'v DashboardVm,
    pub controls: &'v ControlsState,
    pub table: &'v RenderTable,
    pub surface: &'v PulseSurface,
}

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, input: DashboardInput<'_>) -> ControlsResponse {
    let vm = input.vm;
    let mut resp = ControlsResponse::default();

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        size: percent(1.),
        min_size: taffy::Size {
            width: percent(1.),
            height: length(0.0),
        },
        ..Default::default()
    })
    .add(|tui| {
        tui.style(taffy::Style {
            size: taffy::Size {
                width: percent(1.),
                height: length(28.0),
            },
            flex_shrink: 0.0,
            ..Default::default()
        })
        .add(|tui| header::draw(tui, !vm.trigger.enabled, &vm.status_line));

        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            flex_grow: 1.0,
            flex_basis: length(0.0),
            min_size: taffy::Size {
                width: percent(1.),
                height: length(0.0),
            },
            padding: length(8.0),
            gap: length(8.0),
            overflow: taffy::Point {
                x: taffy::Overflow::Hidden,
                y: taffy::Overflow::Hidden,
            },
            ..Default::default()
        })
        .add(|tui| {
            tui.style(taffy::Style {
                size: taffy::Size {
                    width: length(280.0),
                    height: percent(1.),
                },
                flex_shrink: 0.0,
                ..Default::default()
            })
            .add(|tui| {
                resp = controls::draw(
                    tui,
                    ControlsInput {
                        request: input.controls.request,
                        tooltips_enabled: input.controls.tooltips_enabled,
                        trigger: &vm.trigger,
                        presets: &vm.presets,
                    },
                );
            });

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Column,
                flex_grow: 1.0,
                flex_basis: length(0.0),
                gap: length(8.0),
                size: taffy::Size {
                    width: auto(),
                    height: percent(1.),
                },
                min_size: taffy::Size {
                    width: length(0.0),
                    height: length(0.0),
                },
                ..Default::default()
            })
            .add(|tui| {
                pipeline::draw(
                    &mut *tui,
                    PipelineInput {
                        nodes: &vm.nodes,
                        queues: &vm.queues,
                        dlq: &vm.dlq,
                        table: input.table,
                        surface: input.surface,
                    },
                );
                audit::draw(&mut *tui, &vm.audit);
            });
        });
    });

    resp
}
