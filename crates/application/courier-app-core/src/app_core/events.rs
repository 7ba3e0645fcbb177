use chrono::{DateTime, Local};
use courier_core::{PipelineEvent, ScenarioPreset, SimulationRequest};

use crate::domain::SessionId;

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Controls
    PresetSelected(ScenarioPreset),
    RequestEdited(SimulationRequest),
    TooltipsToggled,

    // Session lifecycle
    Reset,
    SessionOpened {
        session_id: SessionId,
        request: SimulationRequest,
    },
    EventReceived {
        session_id: SessionId,
        event: PipelineEvent,
        received_at: DateTime<Local>,
    },
    SessionFailed {
        session_id: SessionId,
        message: String,
    },
}
