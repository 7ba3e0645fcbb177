use crate::surface::PulseSurface;
use crate::theme::*;
use crate::utils::section_label;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

use courier_app_core::{DlqVm, GaugeVm, NodeVm, RenderTable};

const NODE_WIDTH: f32 = 140.0;

/// Stage nodes in the order they are drawn, left to right.
const STAGE_ROW: [&str; 4] = ["ingestion", "preference_check", "online_check", "publisher"];

/// Worker node and the queue drawn under it.
const WORKER_ROW: [(&str, &str); 4] = [
    ("worker_email", "email"),
    ("worker_push", "push"),
    ("worker_sms", "sms"),
    ("worker_in_app", "in_app"),
];

const DLQ_NODE: &str = "dlq";

/// Every sink this layout paints.
pub fn sink_keys() -> Vec<String> {
    let mut keys: Vec<String> = STAGE_ROW
        .iter()
        .chain(WORKER_ROW.iter().map(|(id, _)| id))
        .chain(std::iter::once(&DLQ_NODE))
        .map(|id| format!("node-{id}"))
        .collect();
    for (_, channel) in WORKER_ROW {
        keys.push(format!("queue-{channel}"));
        keys.push(format!("q-bar-{channel}"));
    }
    keys
}

pub struct PipelineInput<'v> {
    pub nodes: &'v [NodeVm],
    pub queues: &'v [GaugeVm],
    pub dlq: &'v DlqVm,
    pub table: &'v RenderTable,
    pub surface: &'v PulseSurface,
}

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, input: PipelineInput<'_>) {
    let glow_of = |sink: Option<&str>| sink.map(|s| input.surface.glow(s)).unwrap_or(0.0);
    let node = |id: &str| input.nodes.iter().find(|n| n.id == id);

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        padding: length(10.0),
        gap: length(10.0),
        size: taffy::Size {
            width: percent(1.),
            height: auto(),
        },
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(COL_BG_DARK)
            .with_border_color(COL_BORDER)
            .with_border_width(1.0),
        |tui| {
            tui.ui(|ui| section_label(ui, "PIPELINE"));

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(6.0),
                ..Default::default()
            })
            .add(|tui| {
                for (i, id) in STAGE_ROW.into_iter().enumerate() {
                    if i > 0 {
                        tui.colored_label(COL_TEXT_DIM, "→");
                    }
                    if let Some(vm) = node(id) {
                        node_box(&mut *tui, vm, glow_of(input.table.node_sink(id)));
                    }
                }
            });

            tui.ui(|ui| section_label(ui, "WORKERS"));

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::FlexStart),
                gap: length(8.0),
                ..Default::default()
            })
            .add(|tui| {
                for (id, channel) in WORKER_ROW {
                    tui.id(egui_taffy::tid(("worker-column", id)))
                        .style(taffy::Style {
                            flex_direction: taffy::FlexDirection::Column,
                            gap: length(4.0),
                            ..Default::default()
                        })
                        .add(|tui| {
                            if let Some(vm) = node(id) {
                                node_box(&mut *tui, vm, glow_of(input.table.node_sink(id)));
                            }
                            if let Some(gauge) = input.queues.iter().find(|g| g.channel == channel)
                            {
                                let glow = glow_of(
                                    input.table.queue_sinks(channel).map(|s| s.bar.as_str()),
                                );
                                queue_gauge(&mut *tui, gauge, glow);
                            }
                        });
                }

                dlq_badge(&mut *tui, input.dlq, glow_of(input.table.dlq_sink()));
            });
        },
    );
}

fn node_box<'a>(tui: impl TuiBuilderLogic<'a>, vm: &NodeVm, glow: f32) {
    let color = status_color(vm.status_class);
    let border = color.lerp_to_gamma(COL_TEXT, glow * 0.6);

    tui.id(egui_taffy::tid(("node", vm.id)))
        .style(taffy::Style {
            flex_direction: taffy::FlexDirection::Column,
            align_items: Some(taffy::AlignItems::Center),
            padding: length(6.0),
            gap: length(2.0),
            size: taffy::Size {
                width: length(NODE_WIDTH),
                height: auto(),
            },
            ..Default::default()
        })
        .bg_add(
            TuiBackground::new()
                .with_background_color(color.linear_multiply(0.08))
                .with_border_color(border)
                .with_border_width(1.0 + glow),
            |tui| {
                let title = tui.ui(|ui| {
                    ui.label(
                        egui::RichText::new(vm.title)
                            .size(11.0)
                            .strong()
                            .color(COL_TEXT),
                    )
                });
                if let Some(tip) = vm.tooltip {
                    title.on_hover_text(tip);
                }

                let badge = match vm.label {
                    Some(label) => label.to_string(),
                    None => vm.status_class.to_uppercase(),
                };
                tui.label(egui::RichText::new(badge).size(10.0).color(color));
            },
        );
}

fn queue_gauge<'a>(tui: impl TuiBuilderLogic<'a>, gauge: &GaugeVm, glow: f32) {
    let fill = COL_ACCENT.lerp_to_gamma(COL_TEXT, glow * 0.5);
    tui.ui(|ui| {
        ui.add(
            egui::ProgressBar::new(gauge.fraction)
                .desired_width(NODE_WIDTH)
                .fill(fill)
                .text(gauge.count_label.as_str()),
        );
    });
}

fn dlq_badge<'a>(tui: impl TuiBuilderLogic<'a>, dlq: &DlqVm, glow: f32) {
    let color = if dlq.has_items { COL_DANGER } else { COL_BORDER };

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        align_items: Some(taffy::AlignItems::Center),
        padding: length(6.0),
        gap: length(2.0),
        size: taffy::Size {
            width: length(NODE_WIDTH),
            height: auto(),
        },
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(color.linear_multiply(0.08))
            .with_border_color(color.lerp_to_gamma(COL_TEXT, glow * 0.6))
            .with_border_width(1.0 + glow),
        |tui| {
            tui.label(
                egui::RichText::new("DEAD LETTER QUEUE")
                    .size(10.0)
                    .strong()
                    .color(COL_TEXT),
            );
            tui.label(
                egui::RichText::new(&dlq.label)
                    .size(12.0)
                    .monospace()
                    .color(if dlq.has_items { COL_DANGER } else { COL_TEXT_DIM }),
            );
        },
    );
}
