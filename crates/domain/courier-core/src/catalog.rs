use std::collections::BTreeMap;

/// Queue lanes reported by the simulator.
pub const CHANNELS: [&str; 4] = ["email", "push", "sms", "in_app"];

pub const DLQ_NODE_ID: &str = "dlq";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Pipeline stage with a text badge.
    Stage,
    /// Channel worker; shows only the status class.
    Worker,
    /// Dead-letter queue; badge driven by `dlq_count`.
    DeadLetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub kind: NodeKind,
    pub tooltip: &'static str,
}

const STANDARD_NODES: [NodeSpec; 9] = [
    NodeSpec {
        id: "ingestion",
        title: "API Gateway",
        kind: NodeKind::Stage,
        tooltip: "Accepts the domain event and resolves its priority and default channels.",
    },
    NodeSpec {
        id: "preference_check",
        title: "Preference Check",
        kind: NodeKind::Stage,
        tooltip: "Looks up user preferences; DND blocks non-critical events.",
    },
    NodeSpec {
        id: "online_check",
        title: "Online Status",
        kind: NodeKind::Stage,
        tooltip: "Checks presence; online users get in-app instead of email.",
    },
    NodeSpec {
        id: "publisher",
        title: "Pub/Sub Fanout",
        kind: NodeKind::Stage,
        tooltip: "Publishes one message per resolved channel queue.",
    },
    NodeSpec {
        id: "worker_email",
        title: "Email Worker",
        kind: NodeKind::Worker,
        tooltip: "Rate limited to 5/sec. Retries with exponential backoff.",
    },
    NodeSpec {
        id: "worker_push",
        title: "Push Worker",
        kind: NodeKind::Worker,
        tooltip: "Rate limited to 10/sec. Retries with exponential backoff.",
    },
    NodeSpec {
        id: "worker_sms",
        title: "SMS Worker",
        kind: NodeKind::Worker,
        tooltip: "Rate limited to 2/sec. Retries with exponential backoff.",
    },
    NodeSpec {
        id: "worker_in_app",
        title: "In-App Worker",
        kind: NodeKind::Worker,
        tooltip: "Rate limited to 20/sec. Retries with exponential backoff.",
    },
    NodeSpec {
        id: DLQ_NODE_ID,
        title: "Dead Letter Queue",
        kind: NodeKind::DeadLetter,
        tooltip: "Messages that exhausted their retries.",
    },
];

/// Nodes the client knows how to render, in display order.
#[derive(Debug, Clone)]
pub struct NodeCatalog {
    nodes: Vec<NodeSpec>,
    by_id: BTreeMap<&'static str, usize>,
}

impl NodeCatalog {
    pub fn standard() -> Self {
        Self::from_specs(STANDARD_NODES.to_vec())
    }

    pub fn from_specs(nodes: Vec<NodeSpec>) -> Self {
        let by_id = nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        Self { nodes, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&NodeSpec> {
        self.by_id.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn channels(&self) -> &'static [&'static str] {
        &CHANNELS
    }

    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &NodeSpec> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }
}

impl Default for NodeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
