use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FrameError;
use crate::StepStatus;

/// Sentinel step closing a session.
pub const DONE_STEP: &str = "done";

/// One frame pushed by the simulator.
///
/// Only `step` and `message` are present on every frame; `status` is missing
/// on the terminal frame and `queues`/`dlq_count` are optional everywhere.
/// Extra fields such as `data` or `timestamp` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub step: String,
    #[serde(default)]
    pub status: Option<StepStatus>,
    pub message: String,
    #[serde(default)]
    pub queues: Option<BTreeMap<String, u64>>,
    #[serde(default)]
    pub dlq_count: Option<u64>,
}

/// Fields shared by every frame, read before the step-specific ones.
#[derive(Deserialize)]
struct FrameHead {
    step: String,
    message: String,
}

impl PipelineEvent {
    /// Parse one frame payload. Non-terminal frames without a status are
    /// rejected. The terminal frame keeps only its message; whatever else it
    /// carries is not validated.
    pub fn parse(data: &str) -> Result<Self, FrameError> {
        let head: FrameHead = serde_json::from_str(data)?;
        if head.step.is_empty() {
            return Err(FrameError::EmptyStep);
        }
        if head.step == DONE_STEP {
            return Ok(Self::done(head.message));
        }
        let ev: PipelineEvent = serde_json::from_str(data)?;
        if ev.status.is_none() {
            return Err(FrameError::MissingStatus { step: ev.step });
        }
        Ok(ev)
    }

    pub fn is_terminal(&self) -> bool {
        self.step == DONE_STEP
    }

    pub fn step_update(
        step: impl Into<String>,
        status: StepStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            step: step.into(),
            status: Some(status),
            message: message.into(),
            queues: None,
            dlq_count: None,
        }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self {
            step: DONE_STEP.to_string(),
            status: None,
            message: message.into(),
            queues: None,
            dlq_count: None,
        }
    }

    pub fn with_queues<I, K>(mut self, queues: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        self.queues = Some(queues.into_iter().map(|(k, v)| (k.into(), v)).collect());
        self
    }

    pub fn with_dlq_count(mut self, count: u64) -> Self {
        self.dlq_count = Some(count);
        self
    }
}
