use courier_core::ScenarioPreset;
use tokio::sync::mpsc;

use crate::app_core::{AppCommand, AppStore, DomainEvent};
use crate::domain::SessionId;
use crate::ports::{StreamSignal, StreamTransport};
use crate::session::SessionManager;

/// Command dispatch plus the single-threaded signal pump. All state changes
/// happen on the thread calling `dispatch`/`tick`/`next_signal`.
pub struct AppKernel<T: StreamTransport> {
    pub store: AppStore,
    session: SessionManager<T>,
    rx: mpsc::Receiver<StreamSignal>,
}

impl<T: StreamTransport> AppKernel<T> {
    pub fn new(store: AppStore, transport: T) -> Self {
        let (tx, rx) = mpsc::channel(courier_config::SIGNAL_CHANNEL_CAPACITY);
        Self {
            store,
            session: SessionManager::new(transport, tx),
            rx,
        }
    }

    /// Returns the new session id for trigger commands.
    pub fn dispatch(&mut self, cmd: AppCommand) -> anyhow::Result<Option<SessionId>> {
        match cmd {
            AppCommand::SelectPreset(preset) => {
                self.store.apply(DomainEvent::PresetSelected(preset));
            }

            AppCommand::SelectPresetByName(name) => match name.parse::<ScenarioPreset>() {
                Ok(preset) => self.store.apply(DomainEvent::PresetSelected(preset)),
                Err(e) => tracing::debug!("ignoring preset selection: {e}"),
            },

            AppCommand::EditRequest(request) => {
                self.store.apply(DomainEvent::RequestEdited(request));
            }

            AppCommand::ToggleTooltips => self.store.apply(DomainEvent::TooltipsToggled),

            AppCommand::Trigger => {
                let request = self.store.with_state(|s| s.controls.current_request());
                return self.session.trigger(&self.store, request).map(Some);
            }

            AppCommand::TriggerWith(request) => {
                return self.session.trigger(&self.store, request).map(Some);
            }

            AppCommand::Reset => self.session.reset(&self.store),
        }
        Ok(None)
    }

    /// Drain every queued signal in arrival order without blocking.
    pub fn tick(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(signal) = self.rx.try_recv() {
            self.session.on_signal(&self.store, signal);
            handled += 1;
        }
        handled
    }

    /// Wait for the next signal and reduce it.
    pub async fn next_signal(&mut self) -> bool {
        match self.rx.recv().await {
            Some(signal) => {
                self.session.on_signal(&self.store, signal);
                true
            }
            None => false,
        }
    }

    pub fn is_session_open(&self) -> bool {
        self.store.session().phase.is_open()
    }
}
