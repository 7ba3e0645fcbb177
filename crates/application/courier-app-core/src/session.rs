use std::sync::Arc;

use chrono::Local;
use courier_core::{PipelineEvent, SimulationRequest};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app_core::{AppStore, DomainEvent};
use crate::domain::SessionId;
use crate::ports::{SignalKind, StreamHandle, StreamSignal, StreamTransport};

/// Owns at most one live subscription. A new trigger always closes the
/// previous one first.
pub struct SessionManager<T: StreamTransport> {
    transport: Arc<T>,
    handle: Option<T::Handle>,
    sink: mpsc::Sender<StreamSignal>,
}

impl<T: StreamTransport> SessionManager<T> {
    pub fn new(transport: T, sink: mpsc::Sender<StreamSignal>) -> Self {
        Self {
            transport: Arc::new(transport),
            handle: None,
            sink,
        }
    }

    pub fn trigger(
        &mut self,
        store: &AppStore,
        request: SimulationRequest,
    ) -> anyhow::Result<SessionId> {
        if self.release_handle() {
            debug!("superseding previous session");
        }

        store.apply(DomainEvent::Reset);

        let session_id: SessionId = uuid::Uuid::new_v4();
        store.apply(DomainEvent::SessionOpened {
            session_id,
            request,
        });
        info!(%session_id, event_type = %request.event_type, fail_rate = request.fail_rate, "opening session");

        match self
            .transport
            .open(session_id, &request, self.sink.clone())
        {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(session_id)
            }
            Err(e) => {
                warn!(%session_id, "failed to open stream: {e:#}");
                store.apply(DomainEvent::SessionFailed {
                    session_id,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Close any live subscription and return the view to its baseline.
    pub fn reset(&mut self, store: &AppStore) {
        self.release_handle();
        store.apply(DomainEvent::Reset);
    }

    pub fn on_signal(&mut self, store: &AppStore, signal: StreamSignal) {
        let StreamSignal { session, kind } = signal;
        if !store.session().accepts(session) {
            debug!(%session, "dropping signal for inactive session");
            return;
        }

        match kind {
            SignalKind::Frame(data) => match PipelineEvent::parse(&data) {
                Ok(event) => {
                    let terminal = event.is_terminal();
                    debug!(%session, step = %event.step, "event received");
                    store.apply(DomainEvent::EventReceived {
                        session_id: session,
                        event,
                        received_at: Local::now(),
                    });
                    if terminal {
                        self.release_handle();
                        info!(%session, "session complete");
                    }
                }
                Err(e) => warn!(%session, "dropping malformed frame: {e}"),
            },
            SignalKind::Failed(message) => {
                self.release_handle();
                warn!(%session, "stream failed: {message}");
                store.apply(DomainEvent::SessionFailed {
                    session_id: session,
                    message,
                });
            }
            SignalKind::Ended => {
                self.release_handle();
                warn!(%session, "stream ended before the terminal frame");
                store.apply(DomainEvent::SessionFailed {
                    session_id: session,
                    message: "stream ended before the terminal frame".into(),
                });
            }
        }
    }

    fn release_handle(&mut self) -> bool {
        match self.handle.take() {
            Some(mut handle) => {
                handle.close();
                true
            }
            None => false,
        }
    }
}

impl<T: StreamTransport> Drop for SessionManager<T> {
    fn drop(&mut self) {
        self.release_handle();
    }
}
