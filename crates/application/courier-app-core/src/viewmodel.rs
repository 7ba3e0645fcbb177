use courier_core::{NodeKind, ScenarioPreset};

use crate::audit::AuditClass;
use crate::domain::{AppState, CloseReason, SessionPhase};
use crate::pipeline::gauge_fraction;

pub const TRIGGER_LABEL: &str = "TRIGGER EVENT";
pub const TRIGGER_BUSY_LABEL: &str = "Processing...";
pub const IDLE_LABEL: &str = "Idle";

#[derive(Debug, Clone, PartialEq)]
pub struct NodeVm {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: NodeKind,
    pub tooltip: Option<&'static str>,
    /// `idle` until the node receives its first event.
    pub status_class: &'static str,
    pub label: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeVm {
    pub channel: String,
    pub depth: u64,
    pub fraction: f32,
    pub count_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DlqVm {
    pub count: u64,
    pub label: String,
    pub has_items: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditLineVm {
    pub time: String,
    pub text: String,
    pub class: AuditClass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerVm {
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresetButtonVm {
    pub preset: ScenarioPreset,
    pub title: &'static str,
    pub description: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardVm {
    pub nodes: Vec<NodeVm>,
    pub queues: Vec<GaugeVm>,
    pub dlq: DlqVm,
    pub audit: Vec<AuditLineVm>,
    pub trigger: TriggerVm,
    pub presets: Vec<PresetButtonVm>,
    pub status_line: String,
}

pub fn dashboard_vm(state: &AppState) -> DashboardVm {
    let view = &state.pipeline;
    let tooltips = state.controls.tooltips_enabled;

    let nodes = state
        .catalog
        .nodes()
        .iter()
        .filter(|spec| spec.kind != NodeKind::DeadLetter)
        .map(|spec| {
            let node = view.node(spec.id);
            NodeVm {
                id: spec.id,
                title: spec.title,
                kind: spec.kind,
                tooltip: tooltips.then_some(spec.tooltip),
                status_class: node.map(|n| n.status.as_str()).unwrap_or("idle"),
                label: match spec.kind {
                    NodeKind::Stage => Some(node.and_then(|n| n.label).unwrap_or(IDLE_LABEL)),
                    _ => None,
                },
            }
        })
        .collect();

    let queues = state
        .catalog
        .channels()
        .iter()
        .map(|ch| {
            let depth = view.queue_depth(ch);
            GaugeVm {
                channel: ch.to_string(),
                depth,
                fraction: gauge_fraction(depth),
                count_label: format!("{depth} msg"),
            }
        })
        .collect();

    let dlq = DlqVm {
        count: view.dlq_count,
        label: format!("{} Messages", view.dlq_count),
        has_items: view.dlq_has_items,
    };

    let audit = view
        .audit
        .iter()
        .map(|e| AuditLineVm {
            time: e.time_label(),
            text: format!("[{}] {}", e.step.to_uppercase(), e.message),
            class: e.class(),
        })
        .collect();

    let enabled = state.trigger_enabled();
    let trigger = TriggerVm {
        enabled,
        label: if enabled {
            TRIGGER_LABEL
        } else {
            TRIGGER_BUSY_LABEL
        },
    };

    DashboardVm {
        nodes,
        queues,
        dlq,
        audit,
        trigger,
        presets: preset_buttons(state),
        status_line: status_line(state),
    }
}

pub fn preset_buttons(state: &AppState) -> Vec<PresetButtonVm> {
    ScenarioPreset::ALL
        .into_iter()
        .map(|preset| PresetButtonVm {
            preset,
            title: preset.title(),
            description: preset.description(),
            active: state.controls.active_preset == Some(preset),
        })
        .collect()
}

fn status_line(state: &AppState) -> String {
    let fired = state
        .pipeline
        .fired
        .map(|r| format!("{} @ {}% failure", r.event_type, r.fail_rate));

    match (state.session.phase, &state.session.close_reason, fired) {
        (SessionPhase::Idle, _, _) | (_, _, None) => "READY".to_string(),
        (SessionPhase::Opening, _, Some(f)) => format!("CONNECTING: {f}"),
        (SessionPhase::Active, _, Some(f)) => format!("STREAMING: {f}"),
        (SessionPhase::Closed, Some(CloseReason::TransportFailed(msg)), Some(f)) => {
            format!("STREAM LOST: {f} ({msg})")
        }
        (SessionPhase::Closed, _, Some(f)) => format!("COMPLETE: {f}"),
    }
}
