//! Logical id -> render sink mapping and the change notifications the core
//! emits for a painting surface.

use std::collections::{BTreeMap, BTreeSet};

use courier_core::{NodeCatalog, NodeKind, StepStatus};

use crate::audit::AuditEntry;
use crate::pipeline::{gauge_fraction, PipelineView};

pub const AUDIT_LOG_SINK: &str = "audit-log";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render surface has no sink '{key}'")]
    MissingSink { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSinks {
    pub count: String,
    pub bar: String,
}

/// Built once from the node catalog and validated against the surface at
/// startup, so per-event painting never looks keys up ad hoc.
#[derive(Debug, Clone)]
pub struct RenderTable {
    nodes: BTreeMap<String, String>,
    queues: BTreeMap<String, QueueSinks>,
    dlq: Option<String>,
    log: String,
}

impl RenderTable {
    pub fn for_catalog(catalog: &NodeCatalog) -> Self {
        let mut nodes = BTreeMap::new();
        let mut dlq = None;
        for spec in catalog.nodes() {
            let key = format!("node-{}", spec.id);
            match spec.kind {
                NodeKind::Stage | NodeKind::Worker => {
                    nodes.insert(spec.id.to_string(), key);
                }
                NodeKind::DeadLetter => dlq = Some(key),
            }
        }

        let queues = catalog
            .channels()
            .iter()
            .map(|ch| {
                (
                    ch.to_string(),
                    QueueSinks {
                        count: format!("queue-{ch}"),
                        bar: format!("q-bar-{ch}"),
                    },
                )
            })
            .collect();

        Self {
            nodes,
            queues,
            dlq,
            log: AUDIT_LOG_SINK.to_string(),
        }
    }

    pub fn node_sink(&self, id: &str) -> Option<&str> {
        self.nodes.get(id).map(String::as_str)
    }

    pub fn queue_sinks(&self, channel: &str) -> Option<&QueueSinks> {
        self.queues.get(channel)
    }

    pub fn dlq_sink(&self) -> Option<&str> {
        self.dlq.as_deref()
    }

    pub fn log_sink(&self) -> &str {
        &self.log
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.nodes.values().map(String::as_str).collect();
        for q in self.queues.values() {
            keys.push(&q.count);
            keys.push(&q.bar);
        }
        keys.extend(self.dlq.as_deref());
        keys.push(&self.log);
        keys
    }

    /// Fails on the first sink the surface does not provide.
    pub fn validate<'a>(
        &self,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), RenderError> {
        let available: BTreeSet<&str> = available.into_iter().collect();
        match self.keys().into_iter().find(|k| !available.contains(k)) {
            Some(key) => Err(RenderError::MissingSink {
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderUpdate {
    /// Every sink back to its idle paint.
    Cleared,
    Node {
        sink: String,
        status: StepStatus,
        label: Option<&'static str>,
    },
    Queue {
        count_sink: String,
        bar_sink: String,
        depth: u64,
        fraction: f32,
    },
    Dlq {
        sink: String,
        count: u64,
        has_items: bool,
    },
    AuditAppended {
        sink: String,
        entry: AuditEntry,
    },
}

pub trait RenderSink {
    fn paint(&mut self, update: &RenderUpdate);
}

/// Notifications turning `prev` into `next`. `reset` repaints from scratch.
pub fn diff(
    table: &RenderTable,
    prev: &PipelineView,
    next: &PipelineView,
    reset: bool,
) -> Vec<RenderUpdate> {
    let baseline;
    let prev = if reset {
        baseline = PipelineView::baseline();
        &baseline
    } else {
        prev
    };

    let mut out = Vec::new();
    if reset {
        out.push(RenderUpdate::Cleared);
    }

    for (id, node) in &next.nodes {
        if prev.nodes.get(id) == Some(node) {
            continue;
        }
        if let Some(sink) = table.node_sink(id) {
            out.push(RenderUpdate::Node {
                sink: sink.to_string(),
                status: node.status,
                label: node.label,
            });
        }
    }

    for (channel, &depth) in &next.queues {
        if prev.queues.get(channel) == Some(&depth) {
            continue;
        }
        if let Some(sinks) = table.queue_sinks(channel) {
            out.push(RenderUpdate::Queue {
                count_sink: sinks.count.clone(),
                bar_sink: sinks.bar.clone(),
                depth,
                fraction: gauge_fraction(depth),
            });
        }
    }

    if prev.dlq_count != next.dlq_count || prev.dlq_has_items != next.dlq_has_items {
        if let Some(sink) = table.dlq_sink() {
            out.push(RenderUpdate::Dlq {
                sink: sink.to_string(),
                count: next.dlq_count,
                has_items: next.dlq_has_items,
            });
        }
    }

    let already = prev.audit.len().min(next.audit.len());
    for entry in &next.audit.entries()[already..] {
        out.push(RenderUpdate::AuditAppended {
            sink: table.log_sink().to_string(),
            entry: entry.clone(),
        });
    }

    out
}
