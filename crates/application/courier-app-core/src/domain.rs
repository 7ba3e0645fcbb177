use std::sync::Arc;

use courier_core::{EventType, NodeCatalog, ScenarioPreset, SimulationRequest};

use crate::pipeline::PipelineView;

pub type SessionId = uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    /// Subscription requested, no event dispatched yet.
    Opening,
    Active,
    Closed,
}

impl SessionPhase {
    pub fn is_open(self) -> bool {
        matches!(self, SessionPhase::Opening | SessionPhase::Active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    Completed,
    TransportFailed(String),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub id: Option<SessionId>,
    pub phase: SessionPhase,
    pub close_reason: Option<CloseReason>,
}

impl SessionState {
    pub fn idle() -> Self {
        Self {
            id: None,
            phase: SessionPhase::Idle,
            close_reason: None,
        }
    }

    pub fn accepts(&self, session_id: SessionId) -> bool {
        self.id == Some(session_id) && self.phase.is_open()
    }
}

/// Values behind the user-facing controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsState {
    pub request: SimulationRequest,
    pub active_preset: Option<ScenarioPreset>,
    pub tooltips_enabled: bool,
}

impl Default for ControlsState {
    fn default() -> Self {
        Self {
            request: SimulationRequest::default(),
            active_preset: None,
            tooltips_enabled: true,
        }
    }
}

impl ControlsState {
    /// Replace every manual edit with the preset's parameters.
    pub fn select_preset(&mut self, preset: ScenarioPreset) {
        self.request = preset.request();
        self.active_preset = Some(preset);
    }

    pub fn set_event_type(&mut self, event_type: EventType) {
        self.request.event_type = event_type;
    }

    pub fn set_fail_rate(&mut self, fail_rate: i64) {
        self.request.fail_rate = courier_config::clamp_fail_rate(fail_rate);
    }

    pub fn set_dnd(&mut self, on: bool) {
        self.request.do_not_disturb = on;
    }

    pub fn set_online(&mut self, on: bool) {
        self.request.recipient_online = on;
    }

    pub fn set_slow(&mut self, on: bool) {
        self.request.slow_mode = on;
    }

    pub fn toggle_tooltips(&mut self) {
        self.tooltips_enabled = !self.tooltips_enabled;
    }

    pub fn current_request(&self) -> SimulationRequest {
        SimulationRequest::build(
            self.request.event_type,
            self.request.fail_rate,
            self.request.do_not_disturb,
            self.request.recipient_online,
            self.request.slow_mode,
        )
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<NodeCatalog>,
    pub controls: ControlsState,
    pub session: SessionState,
    pub pipeline: PipelineView,
    /// Bumped every time `pipeline` is re-initialized.
    pub generation: u64,
}

impl AppState {
    pub fn new(catalog: NodeCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            controls: ControlsState::default(),
            session: SessionState::idle(),
            pipeline: PipelineView::baseline(),
            generation: 0,
        }
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.session.phase.is_open()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(NodeCatalog::standard())
    }
}
