mod app;
mod components;
mod screens;
mod surface;
mod theme;
mod utils;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn run() -> eframe::Result<()> {
    setup_logging();

    let base_url = courier_config::simulator_url();
    tracing::info!(%base_url, "using simulator");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("COURIER // PIPELINE"),
        ..Default::default()
    };

    eframe::run_native(
        "Courier",
        options,
        Box::new(move |cc| {
            theme::setup(&cc.egui_ctx);
            let app = app::CourierUiApp::new(&base_url)?;
            Ok(Box::new(app))
        }),
    )
}
