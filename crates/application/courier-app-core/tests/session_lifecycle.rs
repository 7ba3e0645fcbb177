use std::sync::{Arc, Mutex};

use courier_app_core::app_core::{AppCommand, AppStore};
use courier_app_core::kernel::AppKernel;
use courier_app_core::ports::{SignalKind, StreamHandle, StreamSignal, StreamTransport};
use courier_app_core::{CloseReason, PipelineView, SessionId, SessionPhase};
use courier_core::{ScenarioPreset, SimulationRequest, StepStatus};
use tokio::sync::mpsc;

#[derive(Default)]
struct FakeLog {
    opened: Vec<(SessionId, SimulationRequest)>,
    closed: Vec<SessionId>,
    sink: Option<mpsc::Sender<StreamSignal>>,
    refuse_open: bool,
}

#[derive(Clone, Default)]
struct FakeTransport {
    log: Arc<Mutex<FakeLog>>,
}

struct FakeHandle {
    session: SessionId,
    log: Arc<Mutex<FakeLog>>,
    closed: bool,
}

impl StreamHandle for FakeHandle {
    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.log.lock().unwrap().closed.push(self.session);
        }
    }
}

impl StreamTransport for FakeTransport {
    type Handle = FakeHandle;

    fn open(
        &self,
        session: SessionId,
        request: &SimulationRequest,
        sink: mpsc::Sender<StreamSignal>,
    ) -> anyhow::Result<Self::Handle> {
        let mut log = self.log.lock().unwrap();
        if log.refuse_open {
            anyhow::bail!("connection refused");
        }
        log.opened.push((session, *request));
        log.sink = Some(sink);
        Ok(FakeHandle {
            session,
            log: self.log.clone(),
            closed: false,
        })
    }
}

impl FakeTransport {
    fn push(&self, session: SessionId, kind: SignalKind) {
        let sink = self.log.lock().unwrap().sink.clone().expect("no stream opened");
        sink.try_send(StreamSignal { session, kind }).unwrap();
    }

    fn frame(&self, session: SessionId, json: &str) {
        self.push(session, SignalKind::Frame(json.to_string()));
    }

    fn closed(&self) -> Vec<SessionId> {
        self.log.lock().unwrap().closed.clone()
    }

    fn opened(&self) -> Vec<(SessionId, SimulationRequest)> {
        self.log.lock().unwrap().opened.clone()
    }
}

fn kernel() -> (AppKernel<FakeTransport>, FakeTransport, AppStore) {
    let transport = FakeTransport::default();
    let store = AppStore::default();
    let kernel = AppKernel::new(store.clone(), transport.clone());
    (kernel, transport, store)
}

fn trigger(kernel: &mut AppKernel<FakeTransport>) -> SessionId {
    kernel
        .dispatch(AppCommand::Trigger)
        .expect("trigger")
        .expect("session id")
}

#[test]
fn trigger_opens_with_the_current_controls() {
    let (mut kernel, transport, store) = kernel();
    kernel
        .dispatch(AppCommand::SelectPreset(ScenarioPreset::Outage))
        .unwrap();

    let session = trigger(&mut kernel);

    let opened = transport.opened();
    assert_eq!(opened, vec![(session, ScenarioPreset::Outage.request())]);

    let state = store.state();
    assert_eq!(state.session.phase, SessionPhase::Opening);
    assert!(!state.trigger_enabled());
    assert_eq!(state.pipeline.fired, Some(ScenarioPreset::Outage.request()));
}

#[test]
fn terminal_frame_closes_the_session_exactly_once() {
    let (mut kernel, transport, store) = kernel();
    let session = trigger(&mut kernel);

    transport.frame(
        session,
        r#"{"step":"ingestion","status":"processing","message":"API Gateway received event"}"#,
    );
    transport.frame(
        session,
        r#"{"step":"ingestion","status":"success","message":"Event parsed"}"#,
    );
    transport.frame(session, r#"{"step":"done","message":"ok"}"#);
    // The simulator closes the body after the terminal frame.
    transport.push(session, SignalKind::Ended);
    transport.frame(session, r#"{"step":"done","message":"again"}"#);

    assert_eq!(kernel.tick(), 5);

    let state = store.state();
    assert_eq!(state.session.phase, SessionPhase::Closed);
    assert_eq!(state.session.close_reason, Some(CloseReason::Completed));
    assert!(state.trigger_enabled());
    assert!(!state.pipeline.session_active);

    let done: Vec<_> = state
        .pipeline
        .audit
        .iter()
        .filter(|e| e.step == "done")
        .collect();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].status, StepStatus::Success);
    assert_eq!(done[0].message, "ok");
    assert_eq!(state.pipeline.audit.len(), 3);
    assert_eq!(transport.closed(), vec![session]);
}

#[test]
fn terminal_frame_with_odd_extras_still_completes() {
    let (mut kernel, transport, store) = kernel();
    let session = trigger(&mut kernel);

    transport.frame(
        session,
        r#"{"step":"done","status":"complete","message":"ok","queues":{"email":-1}}"#,
    );
    transport.push(session, SignalKind::Ended);
    kernel.tick();

    let state = store.state();
    assert_eq!(state.session.phase, SessionPhase::Closed);
    assert_eq!(state.session.close_reason, Some(CloseReason::Completed));
    assert!(state.trigger_enabled());
    assert_eq!(state.pipeline.audit.len(), 1);
    assert_eq!(state.pipeline.audit.entries()[0].message, "ok");
    assert_eq!(transport.closed(), vec![session]);
}

#[test]
fn transport_error_closes_without_synthesizing_audit() {
    let (mut kernel, transport, store) = kernel();
    let session = trigger(&mut kernel);

    transport.frame(
        session,
        r#"{"step":"ingestion","status":"processing","message":"received"}"#,
    );
    transport.push(session, SignalKind::Failed("connection reset".into()));
    kernel.tick();

    let state = store.state();
    assert_eq!(state.session.phase, SessionPhase::Closed);
    assert_eq!(
        state.session.close_reason,
        Some(CloseReason::TransportFailed("connection reset".into()))
    );
    assert!(state.trigger_enabled());
    assert_eq!(state.pipeline.audit.len(), 1);
    assert_eq!(transport.closed(), vec![session]);
}

#[test]
fn malformed_frames_are_dropped_and_the_session_continues() {
    let (mut kernel, transport, store) = kernel();
    let session = trigger(&mut kernel);

    transport.frame(
        session,
        r#"{"step":"ingestion","status":"processing","message":"one"}"#,
    );
    transport.frame(session, "{not json");
    transport.frame(session, r#"{"step":"ingestion","message":"no status"}"#);
    transport.frame(
        session,
        r#"{"step":"preference_check","status":"success","message":"two"}"#,
    );
    kernel.tick();

    let state = store.state();
    assert_eq!(state.session.phase, SessionPhase::Active);
    let messages: Vec<_> = state
        .pipeline
        .audit
        .iter()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(messages, vec!["one", "two"]);
    assert!(transport.closed().is_empty());
}

#[test]
fn retrigger_supersedes_the_active_session() {
    let (mut kernel, transport, store) = kernel();
    let first = trigger(&mut kernel);

    transport.frame(
        first,
        r#"{"step":"worker_email","status":"failed","message":"old","queues":{"email":2},"dlq_count":1}"#,
    );
    kernel.tick();
    assert!(store.state().pipeline.dlq_has_items);

    // Queued before the supersession, delivered after it.
    transport.frame(first, r#"{"step":"done","message":"old done"}"#);

    let second = trigger(&mut kernel);
    assert_eq!(transport.closed(), vec![first]);

    let fresh = store.state();
    assert_eq!(fresh.pipeline.audit.len(), 0);
    assert!(fresh.pipeline.nodes.is_empty());
    assert_eq!(fresh.pipeline.dlq_count, 0);
    assert!(!fresh.pipeline.dlq_has_items);
    assert_eq!(fresh.pipeline.queue_depth("email"), 0);

    transport.frame(
        second,
        r#"{"step":"ingestion","status":"processing","message":"new"}"#,
    );
    kernel.tick();

    let state = store.state();
    assert_eq!(state.session.id, Some(second));
    assert_eq!(state.session.phase, SessionPhase::Active);
    let steps: Vec<_> = state.pipeline.audit.iter().map(|e| e.step.as_str()).collect();
    assert_eq!(steps, vec!["ingestion"]);
}

#[test]
fn retrigger_after_close_starts_fresh() {
    let (mut kernel, transport, store) = kernel();
    let first = trigger(&mut kernel);
    transport.frame(first, r#"{"step":"done","message":"ok"}"#);
    kernel.tick();

    let second = trigger(&mut kernel);
    assert_ne!(first, second);
    assert_eq!(store.state().session.phase, SessionPhase::Opening);
    assert!(store.state().pipeline.audit.is_empty());
    assert_eq!(transport.closed(), vec![first]);
}

#[test]
fn reset_closes_the_stream_and_restores_the_baseline() {
    let (mut kernel, transport, store) = kernel();
    let session = trigger(&mut kernel);
    transport.frame(
        session,
        r#"{"step":"publisher","status":"success","message":"pushed","queues":{"push":1}}"#,
    );
    kernel.tick();

    kernel.dispatch(AppCommand::Reset).unwrap();

    let state = store.state();
    assert_eq!(state.pipeline, PipelineView::baseline());
    assert_eq!(state.session.phase, SessionPhase::Idle);
    assert!(state.trigger_enabled());
    assert_eq!(transport.closed(), vec![session]);
}

#[test]
fn failed_open_leaves_the_trigger_armed() {
    let (mut kernel, transport, store) = kernel();
    transport.log.lock().unwrap().refuse_open = true;

    assert!(kernel.dispatch(AppCommand::Trigger).is_err());

    let state = store.state();
    assert_eq!(state.session.phase, SessionPhase::Closed);
    assert!(matches!(
        state.session.close_reason,
        Some(CloseReason::TransportFailed(_))
    ));
    assert!(state.trigger_enabled());
}

#[test]
fn unknown_preset_names_are_a_no_op() {
    let (mut kernel, _transport, store) = kernel();
    kernel
        .dispatch(AppCommand::SelectPreset(ScenarioPreset::Dnd))
        .unwrap();
    let before = store.state().controls;

    kernel
        .dispatch(AppCommand::SelectPresetByName("meltdown".into()))
        .unwrap();

    assert_eq!(store.state().controls, before);
}

#[tokio::test]
async fn next_signal_waits_for_the_transport() {
    let (mut kernel, transport, store) = kernel();
    let session = trigger(&mut kernel);

    let pusher = transport.clone();
    tokio::spawn(async move {
        pusher.frame(
            session,
            r#"{"step":"ingestion","status":"processing","message":"late"}"#,
        );
    });

    assert!(kernel.next_signal().await);
    assert_eq!(store.state().pipeline.audit.len(), 1);
}
