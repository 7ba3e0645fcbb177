use chrono::{DateTime, Local};
use courier_core::{NodeKind, PipelineEvent, StepStatus};

use crate::audit::AuditEntry;
use crate::domain::{AppState, CloseReason, SessionPhase, SessionState};
use crate::pipeline::{NodeState, PipelineView};

use super::events::DomainEvent;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        DomainEvent::PresetSelected(preset) => state.controls.select_preset(preset),
        DomainEvent::RequestEdited(request) => {
            let controls = &mut state.controls;
            controls.set_event_type(request.event_type);
            controls.set_fail_rate(request.fail_rate as i64);
            controls.set_dnd(request.do_not_disturb);
            controls.set_online(request.recipient_online);
            controls.set_slow(request.slow_mode);
        }
        DomainEvent::TooltipsToggled => state.controls.toggle_tooltips(),

        DomainEvent::Reset => {
            let reason = state.session.phase.is_open().then_some(CloseReason::Reset);
            state.session = SessionState {
                close_reason: reason,
                ..SessionState::idle()
            };
            reset_view(&mut state);
        }

        DomainEvent::SessionOpened {
            session_id,
            request,
        } => {
            reset_view(&mut state);
            state.pipeline.fired = Some(request);
            state.pipeline.session_active = true;
            state.session = SessionState {
                id: Some(session_id),
                phase: SessionPhase::Opening,
                close_reason: None,
            };
        }

        DomainEvent::EventReceived {
            session_id,
            event,
            received_at,
        } => {
            if state.session.accepts(session_id) {
                let terminal = event.is_terminal();
                let kind = state.catalog.get(&event.step).map(|n| n.kind);
                apply_pipeline_event(&mut state.pipeline, kind, event, received_at);
                state.session.phase = if terminal {
                    state.session.close_reason = Some(CloseReason::Completed);
                    SessionPhase::Closed
                } else {
                    SessionPhase::Active
                };
            }
        }

        DomainEvent::SessionFailed {
            session_id,
            message,
        } => {
            if state.session.accepts(session_id) {
                state.pipeline.session_active = false;
                state.session.phase = SessionPhase::Closed;
                state.session.close_reason = Some(CloseReason::TransportFailed(message));
            }
        }
    }
    state
}

fn reset_view(state: &mut AppState) {
    state.pipeline = PipelineView::baseline();
    state.generation = state.generation.wrapping_add(1);
}

/// Reduction of one pushed event. `kind` is `None` for steps outside the
/// node catalog; those are logged but never rendered.
pub fn apply_pipeline_event(
    view: &mut PipelineView,
    kind: Option<NodeKind>,
    event: PipelineEvent,
    received_at: DateTime<Local>,
) {
    if event.is_terminal() {
        view.session_active = false;
        view.audit.append(AuditEntry {
            time: received_at,
            step: event.step,
            status: StepStatus::Success,
            message: event.message,
        });
        return;
    }

    if let Some(queues) = event.queues {
        view.queues.extend(queues);
    }

    if let Some(count) = event.dlq_count {
        view.dlq_count = count;
        if count > 0 {
            view.dlq_has_items = true;
        }
    }

    let status = event.status.unwrap_or(StepStatus::Info);

    if let Some(kind) = kind {
        let previous = view.nodes.get(&event.step).and_then(|n| n.label);
        let label = match kind {
            NodeKind::Stage => status.stage_label().or(previous),
            NodeKind::Worker | NodeKind::DeadLetter => None,
        };
        view.nodes
            .insert(event.step.clone(), NodeState { status, label });
    }

    view.audit.append(AuditEntry {
        time: received_at,
        step: event.step,
        status,
        message: event.message,
    });
}
