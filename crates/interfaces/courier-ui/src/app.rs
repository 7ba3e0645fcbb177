use anyhow::Context;
use eframe::egui;
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, tui, TuiBuilderLogic};

use courier_app_core::app_core::{AppCommand, AppStore};
use courier_app_core::{dashboard_vm, diff, AppKernel, PipelineView, RenderSink, RenderTable};
use courier_infra::HttpStreamTransport;

use crate::components::controls::ControlsResponse;
use crate::screens::dashboard::{self, DashboardInput};
use crate::surface::PulseSurface;

pub struct CourierUiApp {
    kernel: AppKernel<HttpStreamTransport>,
    table: RenderTable,
    surface: PulseSurface,
    painted: PipelineView,
    painted_generation: u64,
}

impl CourierUiApp {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let store = AppStore::default();
        let table = store.with_state(|s| RenderTable::for_catalog(&s.catalog));
        let keys = dashboard::sink_keys();
        table
            .validate(keys.iter().map(String::as_str))
            .context("dashboard layout does not cover the node catalog")?;

        let transport = HttpStreamTransport::connect_to(base_url)?;
        let (painted, painted_generation) =
            store.with_state(|s| (s.pipeline.clone(), s.generation));

        Ok(Self {
            kernel: AppKernel::new(store, transport),
            table,
            surface: PulseSurface::default(),
            painted,
            painted_generation,
        })
    }

    fn sync_surface(&mut self) {
        let unchanged = self.kernel.store.with_state(|s| {
            s.generation == self.painted_generation && s.pipeline == self.painted
        });
        if unchanged {
            return;
        }
        let (next, generation) = self
            .kernel
            .store
            .with_state(|s| (s.pipeline.clone(), s.generation));
        let reset = generation != self.painted_generation;
        for update in diff(&self.table, &self.painted, &next, reset) {
            self.surface.paint(&update);
        }
        self.painted = next;
        self.painted_generation = generation;
    }

    fn dispatch(&mut self, cmd: AppCommand) {
        if let Err(e) = self.kernel.dispatch(cmd) {
            tracing::error!("command failed: {e:#}");
        }
    }

    fn handle(&mut self, resp: ControlsResponse) {
        let mut changed = false;
        if let Some(preset) = resp.preset {
            self.dispatch(AppCommand::SelectPreset(preset));
            changed = true;
        }
        if let Some(request) = resp.edited {
            self.dispatch(AppCommand::EditRequest(request));
            changed = true;
        }
        if resp.toggle_tooltips {
            self.dispatch(AppCommand::ToggleTooltips);
            changed = true;
        }
        if resp.reset {
            self.dispatch(AppCommand::Reset);
            changed = true;
        }
        if resp.trigger {
            self.dispatch(AppCommand::Trigger);
            changed = true;
        }
        if changed {
            self.sync_surface();
        }
    }
}

impl eframe::App for CourierUiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.kernel.tick() > 0 {
            self.sync_surface();
        }

        ctx.options_mut(|options| {
            options.max_passes =
                std::num::NonZeroUsize::new(3).unwrap_or(std::num::NonZeroUsize::MIN);
        });
        ctx.style_mut(|style| {
            // Width-independent text measurement for the taffy multi-pass layout.
            style.wrap_mode = Some(egui::TextWrapMode::Extend);
        });

        let (vm, controls) = self
            .kernel
            .store
            .with_state(|s| (dashboard_vm(s), s.controls.clone()));
        let mut resp = ControlsResponse::default();

        egui::CentralPanel::default().show(ctx, |ui| {
            tui(ui, ui.id().with("root"))
                .reserve_available_space()
                .style(taffy::Style {
                    flex_direction: taffy::FlexDirection::Column,
                    size: percent(1.),
                    min_size: taffy::Size {
                        width: percent(1.),
                        height: length(0.0),
                    },
                    ..Default::default()
                })
                .show(|tui| {
                    resp = dashboard::draw(
                        tui,
                        DashboardInput {
                            vm: &vm,
                            controls: &controls,
                            table: &self.table,
                            surface: &self.surface,
                        },
                    );
                });
        });

        self.handle(resp);

        if self.kernel.is_session_open() || self.surface.is_animating() {
            ctx.request_repaint();
        }
    }
}
