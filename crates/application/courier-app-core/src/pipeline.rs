use std::collections::BTreeMap;

use courier_core::{SimulationRequest, StepStatus, CHANNELS};

use crate::audit::AuditTrail;

/// Status of one rendered node. `label` is the stage badge text; worker and
/// dead-letter nodes never carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState {
    pub status: StepStatus,
    pub label: Option<&'static str>,
}

/// Everything the dashboard renders for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineView {
    pub nodes: BTreeMap<String, NodeState>,
    pub queues: BTreeMap<String, u64>,
    pub dlq_count: u64,
    pub dlq_has_items: bool,
    pub audit: AuditTrail,
    pub session_active: bool,
    pub fired: Option<SimulationRequest>,
}

impl PipelineView {
    pub fn baseline() -> Self {
        Self {
            nodes: BTreeMap::new(),
            queues: CHANNELS.iter().map(|c| (c.to_string(), 0)).collect(),
            dlq_count: 0,
            dlq_has_items: false,
            audit: AuditTrail::default(),
            session_active: false,
            fired: None,
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodeState> {
        self.nodes.get(id)
    }

    pub fn queue_depth(&self, channel: &str) -> u64 {
        self.queues.get(channel).copied().unwrap_or(0)
    }
}

impl Default for PipelineView {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Cosmetic gauge fill: [`courier_config::GAUGE_FULL_DEPTH`] queued messages
/// fill the bar.
pub fn gauge_fraction(depth: u64) -> f32 {
    (depth as f32 / courier_config::GAUGE_FULL_DEPTH as f32).min(1.0)
}
