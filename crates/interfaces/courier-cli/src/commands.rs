use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use courier_app_core::app_core::{AppCommand, AppStore};
use courier_app_core::{diff, AppKernel, CloseReason, RenderSink, RenderTable};
use courier_core::{ScenarioPreset, SimulationRequest};
use courier_infra::HttpStreamTransport;
use indicatif::{ProgressBar, ProgressStyle};

use crate::console::ConsoleSink;

#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Audit trail as printed, in arrival order.
    pub lines: Vec<String>,
    pub queues: BTreeMap<String, u64>,
    pub dlq_count: u64,
}

/// Fire one simulation and stream its audit trail to stdout. Fails if the
/// stream breaks before the terminal frame.
pub async fn cmd_run(base_url: String, request: SimulationRequest) -> Result<RunSummary> {
    println!(":: Firing event: {}", request.event_type);
    println!("   Simulator: {}", base_url);
    println!(
        "   Params:    fail_rate={}% dnd={} online={} slow={}",
        request.fail_rate, request.do_not_disturb, request.recipient_online, request.slow_mode
    );

    let transport = HttpStreamTransport::connect_to(base_url)?;
    let store = AppStore::default();
    let table = store.with_state(|s| RenderTable::for_catalog(&s.catalog));
    let mut kernel = AppKernel::new(store.clone(), transport);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("spinner template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Connecting...");

    let mut sink = ConsoleSink::new(pb.clone());
    let (mut prev, mut generation) = store.with_state(|s| (s.pipeline.clone(), s.generation));

    if let Err(e) = kernel.dispatch(AppCommand::TriggerWith(request)) {
        pb.finish_and_clear();
        return Err(e.context("opening event stream"));
    }

    while kernel.is_session_open() {
        if !kernel.next_signal().await {
            break;
        }
        let (next, next_generation) = store.with_state(|s| (s.pipeline.clone(), s.generation));
        for update in diff(&table, &prev, &next, next_generation != generation) {
            sink.paint(&update);
        }
        prev = next;
        generation = next_generation;
    }
    pb.finish_and_clear();

    let state = store.state();
    match state.session.close_reason {
        Some(CloseReason::Completed) => {}
        Some(CloseReason::TransportFailed(message)) => {
            anyhow::bail!("stream failed before completion: {message}")
        }
        other => anyhow::bail!("session ended unexpectedly: {other:?}"),
    }

    println!("\n:: Queues");
    for (channel, depth) in &state.pipeline.queues {
        println!("   {:<8} {} msg", channel, depth);
    }
    println!("   DLQ:     {} Messages", state.pipeline.dlq_count);

    Ok(RunSummary {
        lines: sink.into_lines(),
        queues: state.pipeline.queues,
        dlq_count: state.pipeline.dlq_count,
    })
}

pub fn cmd_presets() {
    println!(":: Scenario presets");
    for preset in ScenarioPreset::ALL {
        let req = preset.request();
        println!("\n   {:<8} {}", preset.name(), preset.title());
        println!("            {}", preset.description());
        println!("            {}", req.to_query_string());
    }
}

pub fn cmd_url(base_url: &str, request: SimulationRequest) -> String {
    let url = request.simulate_url(base_url);
    println!("{url}");
    url
}
