use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod error;
pub mod event;
pub mod preset;
pub mod request;

pub use catalog::{NodeCatalog, NodeKind, NodeSpec, CHANNELS, DLQ_NODE_ID};
pub use error::{CoreError, FrameError};
pub use event::{PipelineEvent, DONE_STEP};
pub use preset::{apply_preset, ScenarioPreset};
pub use request::{EventType, SimulationRequest, SIMULATE_PATH};

/// Status reported by the simulator for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Processing,
    Success,
    Failed,
    Error,
    Info,
}

impl StepStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Processing => "processing",
            StepStatus::Success => "success",
            StepStatus::Failed => "failed",
            StepStatus::Error => "error",
            StepStatus::Info => "info",
        }
    }

    /// Text badge for stage nodes. `None` leaves the previous badge in place.
    pub fn stage_label(self) -> Option<&'static str> {
        match self {
            StepStatus::Processing => Some("Processing..."),
            StepStatus::Success => Some("Done"),
            StepStatus::Failed | StepStatus::Error => Some("Blocked"),
            StepStatus::Info => None,
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
