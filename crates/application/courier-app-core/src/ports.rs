use courier_core::SimulationRequest;
use tokio::sync::mpsc;

use crate::domain::SessionId;

/// What a push-stream subscription reports back, tagged with its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSignal {
    pub session: SessionId,
    pub kind: SignalKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalKind {
    /// Payload of one `message` frame, unparsed.
    Frame(String),
    /// The transport gave up (connect error, bad status, broken body).
    Failed(String),
    /// The stream closed cleanly.
    Ended,
}

/// Opens push-stream subscriptions for simulation requests.
pub trait StreamTransport: Send + Sync + 'static {
    type Handle: StreamHandle;

    /// Start streaming `request`. Signals for this subscription are pushed to
    /// `sink` tagged with `session` until the handle is closed.
    fn open(
        &self,
        session: SessionId,
        request: &SimulationRequest,
        sink: mpsc::Sender<StreamSignal>,
    ) -> anyhow::Result<Self::Handle>;
}

/// A live subscription. Closing is idempotent.
pub trait StreamHandle: Send + 'static {
    fn close(&mut self);
}
