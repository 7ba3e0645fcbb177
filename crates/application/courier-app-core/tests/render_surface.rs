use chrono::Local;
use courier_app_core::app_core::{reduce, DomainEvent};
use courier_app_core::render::AUDIT_LOG_SINK;
use courier_app_core::{
    dashboard_vm, diff, AppState, AuditClass, PipelineView, RenderError, RenderSink,
    RenderTable, RenderUpdate, SessionId, TRIGGER_BUSY_LABEL, TRIGGER_LABEL,
};
use courier_core::{NodeCatalog, PipelineEvent, SimulationRequest, StepStatus};

fn surface_keys() -> Vec<&'static str> {
    vec![
        "node-ingestion",
        "node-preference_check",
        "node-online_check",
        "node-publisher",
        "node-worker_email",
        "node-worker_push",
        "node-worker_sms",
        "node-worker_in_app",
        "node-dlq",
        "queue-email",
        "queue-push",
        "queue-sms",
        "queue-in_app",
        "q-bar-email",
        "q-bar-push",
        "q-bar-sms",
        "q-bar-in_app",
        AUDIT_LOG_SINK,
    ]
}

#[test]
fn standard_catalog_matches_the_dashboard_surface() {
    let table = RenderTable::for_catalog(&NodeCatalog::standard());
    table.validate(surface_keys()).unwrap();

    assert_eq!(table.node_sink("worker_sms"), Some("node-worker_sms"));
    assert_eq!(table.node_sink("dlq"), None);
    assert_eq!(table.dlq_sink(), Some("node-dlq"));
    assert_eq!(table.queue_sinks("in_app").unwrap().bar, "q-bar-in_app");
}

#[test]
fn missing_sink_fails_validation() {
    let table = RenderTable::for_catalog(&NodeCatalog::standard());
    let keys: Vec<_> = surface_keys()
        .into_iter()
        .filter(|k| *k != "q-bar-sms")
        .collect();

    match table.validate(keys) {
        Err(RenderError::MissingSink { key }) => assert_eq!(key, "q-bar-sms"),
        other => panic!("expected missing sink, got {other:?}"),
    }
}

#[derive(Default)]
struct Recorder(Vec<RenderUpdate>);

impl RenderSink for Recorder {
    fn paint(&mut self, update: &RenderUpdate) {
        self.0.push(update.clone());
    }
}

#[test]
fn diff_reports_only_what_changed() {
    let table = RenderTable::for_catalog(&NodeCatalog::standard());
    let prev = PipelineView::baseline();
    let mut next = prev.clone();
    courier_app_core::app_core::reducer::apply_pipeline_event(
        &mut next,
        Some(courier_core::NodeKind::Worker),
        PipelineEvent::step_update("worker_sms", StepStatus::Failed, "carrier down")
            .with_queues([("sms", 1)])
            .with_dlq_count(1),
        Local::now(),
    );

    let mut recorder = Recorder::default();
    for update in diff(&table, &prev, &next, false) {
        recorder.paint(&update);
    }

    let updates = recorder.0;
    assert_eq!(updates.len(), 4);
    assert!(matches!(
        &updates[0],
        RenderUpdate::Node { sink, status: StepStatus::Failed, label: None } if sink == "node-worker_sms"
    ));
    assert!(matches!(
        &updates[1],
        RenderUpdate::Queue { bar_sink, depth: 1, fraction, .. } if bar_sink == "q-bar-sms" && *fraction == 0.5
    ));
    assert!(matches!(
        &updates[2],
        RenderUpdate::Dlq { count: 1, has_items: true, .. }
    ));
    assert!(matches!(
        &updates[3],
        RenderUpdate::AuditAppended { sink, entry } if sink == AUDIT_LOG_SINK && entry.message == "carrier down"
    ));

    assert!(diff(&table, &next, &next, false).is_empty());
}

#[test]
fn reset_diff_starts_with_cleared() {
    let table = RenderTable::for_catalog(&NodeCatalog::standard());
    let view = PipelineView::baseline();

    assert_eq!(diff(&table, &view, &view, true), vec![RenderUpdate::Cleared]);
}

#[test]
fn baseline_dashboard_is_idle() {
    let vm = dashboard_vm(&AppState::default());

    assert_eq!(vm.nodes.len(), 8);
    for node in vm.nodes.iter().filter(|n| n.id.starts_with("worker_")) {
        assert_eq!(node.status_class, "idle");
        assert_eq!(node.label, None);
    }
    let ingestion = &vm.nodes[0];
    assert_eq!(ingestion.label, Some("Idle"));
    assert!(ingestion.tooltip.is_some());

    assert!(vm.queues.iter().all(|g| g.count_label == "0 msg" && g.fraction == 0.0));
    assert_eq!(vm.dlq.label, "0 Messages");
    assert!(!vm.dlq.has_items);
    assert!(vm.audit.is_empty());
    assert_eq!(vm.trigger.label, TRIGGER_LABEL);
    assert!(vm.trigger.enabled);
    assert_eq!(vm.status_line, "READY");
    assert!(vm.presets.iter().all(|p| !p.active));
}

#[test]
fn active_session_dashboard() {
    let session_id: SessionId = uuid::Uuid::new_v4();
    let mut state = reduce(
        AppState::default(),
        DomainEvent::SessionOpened {
            session_id,
            request: SimulationRequest::default(),
        },
    );
    state = reduce(
        state,
        DomainEvent::EventReceived {
            session_id,
            event: PipelineEvent::step_update("ingestion", StepStatus::Processing, "received"),
            received_at: Local::now(),
        },
    );
    state = reduce(state, DomainEvent::TooltipsToggled);

    let vm = dashboard_vm(&state);
    assert_eq!(vm.trigger.label, TRIGGER_BUSY_LABEL);
    assert!(!vm.trigger.enabled);
    assert_eq!(vm.nodes[0].label, Some("Processing..."));
    assert_eq!(vm.nodes[0].status_class, "processing");
    assert!(vm.nodes.iter().all(|n| n.tooltip.is_none()));
    assert_eq!(vm.audit.len(), 1);
    assert_eq!(vm.audit[0].text, "[INGESTION] received");
    assert_eq!(vm.audit[0].class, AuditClass::Info);
    assert!(vm.status_line.starts_with("STREAMING: order.placed"));
}
