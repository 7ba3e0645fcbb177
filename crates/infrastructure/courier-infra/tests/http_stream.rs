use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::{header, StatusCode, Uri};
use axum::{routing::get, Router};
use courier_app_core::app_core::{AppCommand, AppStore};
use courier_app_core::{AppKernel, CloseReason, SessionPhase};
use courier_core::{ScenarioPreset, StepStatus};
use courier_infra::HttpStreamTransport;

const HAPPY_BODY: &str = concat!(
    ": connected\n\n",
    "data: {\"step\":\"ingestion\",\"status\":\"processing\",\"message\":\"API Gateway received event\",",
    "\"queues\":{\"email\":0,\"push\":0,\"sms\":0,\"in_app\":0},\"dlq_count\":0,\"data\":{},\"timestamp\":1.5}\n\n",
    "event: heartbeat\ndata: {}\n\n",
    "data: {\"step\":\"worker_sms\",\"status\":\"failed\",\"message\":\"SMS provider timeout\",",
    "\"queues\":{\"sms\":1},\"dlq_count\":1}\r\n\r\n",
    "data: {\"step\":\"done\",\"status\":\"info\",\"message\":\"Simulation complete\"}\n\n",
);

const TRUNCATED_BODY: &str = concat!(
    "data: {\"step\":\"ingestion\",\"status\":\"processing\",\"message\":\"received\"}\n\n",
    "data: {\"step\":\"done\",",
);

async fn start_mock_simulator(
    body: &'static str,
    status: StatusCode,
) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route(
        "/simulate",
        get({
            let seen = seen.clone();
            move |uri: Uri| async move {
                seen.lock()
                    .unwrap()
                    .push(uri.query().unwrap_or_default().to_string());
                (status, [(header::CONTENT_TYPE, "text/event-stream")], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

fn kernel_for(addr: SocketAddr) -> (AppKernel<HttpStreamTransport>, AppStore) {
    let store = AppStore::default();
    let transport = HttpStreamTransport::connect_to(format!("http://{addr}/")).unwrap();
    (AppKernel::new(store.clone(), transport), store)
}

async fn run_to_close(kernel: &mut AppKernel<HttpStreamTransport>) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while kernel.is_session_open() {
            assert!(kernel.next_signal().await, "signal channel closed");
        }
    })
    .await
    .expect("session did not close in time");
}

#[tokio::test]
async fn streams_a_simulation_into_the_store() {
    let (addr, seen) = start_mock_simulator(HAPPY_BODY, StatusCode::OK).await;
    let (mut kernel, store) = kernel_for(addr);

    kernel
        .dispatch(AppCommand::SelectPreset(ScenarioPreset::Outage))
        .unwrap();
    kernel.dispatch(AppCommand::Trigger).unwrap();
    run_to_close(&mut kernel).await;

    assert_eq!(
        seen.lock().unwrap().as_slice(),
        ["event=password.reset&fail_rate=100&dnd=false&online=false&slow=true"]
    );

    let state = store.state();
    assert_eq!(state.session.phase, SessionPhase::Closed);
    assert_eq!(state.session.close_reason, Some(CloseReason::Completed));

    let steps: Vec<_> = state.pipeline.audit.iter().map(|e| e.step.as_str()).collect();
    assert_eq!(steps, vec!["ingestion", "worker_sms", "done"]);
    assert_eq!(
        state.pipeline.audit.last().map(|e| e.status),
        Some(StepStatus::Success)
    );
    assert_eq!(state.pipeline.queue_depth("sms"), 1);
    assert_eq!(state.pipeline.dlq_count, 1);
    assert!(state.pipeline.dlq_has_items);
    assert_eq!(
        state.pipeline.node("worker_sms").map(|n| n.status),
        Some(StepStatus::Failed)
    );
}

#[tokio::test]
async fn body_ending_before_done_is_a_transport_failure() {
    let (addr, _) = start_mock_simulator(TRUNCATED_BODY, StatusCode::OK).await;
    let (mut kernel, store) = kernel_for(addr);

    kernel.dispatch(AppCommand::Trigger).unwrap();
    run_to_close(&mut kernel).await;

    let state = store.state();
    assert!(matches!(
        state.session.close_reason,
        Some(CloseReason::TransportFailed(_))
    ));
    assert_eq!(state.pipeline.audit.len(), 1);
    assert!(state.trigger_enabled());
}

#[tokio::test]
async fn error_status_is_a_transport_failure() {
    let (addr, _) = start_mock_simulator("", StatusCode::INTERNAL_SERVER_ERROR).await;
    let (mut kernel, store) = kernel_for(addr);

    kernel.dispatch(AppCommand::Trigger).unwrap();
    run_to_close(&mut kernel).await;

    match store.state().session.close_reason {
        Some(CloseReason::TransportFailed(message)) => assert!(message.contains("500")),
        other => panic!("expected transport failure, got {other:?}"),
    }
    assert!(store.state().pipeline.audit.is_empty());
}

#[tokio::test]
async fn unreachable_simulator_is_a_transport_failure() {
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let (mut kernel, store) = kernel_for(addr);

    kernel.dispatch(AppCommand::Trigger).unwrap();
    run_to_close(&mut kernel).await;

    assert!(matches!(
        store.state().session.close_reason,
        Some(CloseReason::TransportFailed(_))
    ));
}
