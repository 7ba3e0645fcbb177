use anyhow::Context;
use courier_app_core::ports::{SignalKind, StreamHandle, StreamSignal, StreamTransport};
use courier_app_core::SessionId;
use courier_core::SimulationRequest;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::Client;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::sse::SseDecoder;

const EVENT_STREAM: &str = "text/event-stream";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to connect to simulator: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("simulator answered {0}")]
    Status(reqwest::StatusCode),
    #[error("event stream broke: {0}")]
    Body(#[source] reqwest::Error),
    #[error("failed to start async runtime: {0}")]
    Runtime(String),
}

/// Subscribes to the simulator's `/simulate` endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStreamTransport {
    client: Client,
    base_url: String,
}

impl HttpStreamTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Default client against `base_url`.
    pub fn connect_to(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = crate::net::default_http_client().context("building HTTP client")?;
        Ok(Self::new(client, base_url))
    }
}

/// Cancels the stream thread when closed or dropped.
pub struct HttpStreamHandle {
    token: CancellationToken,
}

impl StreamHandle for HttpStreamHandle {
    fn close(&mut self) {
        self.token.cancel();
    }
}

impl Drop for HttpStreamHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl StreamTransport for HttpStreamTransport {
    type Handle = HttpStreamHandle;

    fn open(
        &self,
        session: SessionId,
        request: &SimulationRequest,
        sink: mpsc::Sender<StreamSignal>,
    ) -> anyhow::Result<Self::Handle> {
        let token = CancellationToken::new();
        let url = request.simulate_url(&self.base_url);
        let client = self.client.clone();
        let thread_token = token.clone();

        std::thread::Builder::new()
            .name("courier-stream".into())
            .spawn(move || {
                let rt = match crate::runtime::runtime() {
                    Ok(rt) => rt,
                    Err(e) => {
                        let err = TransportError::Runtime(e.to_string());
                        let _ = sink.blocking_send(StreamSignal {
                            session,
                            kind: SignalKind::Failed(err.to_string()),
                        });
                        return;
                    }
                };

                rt.block_on(async move {
                    let outcome = tokio::select! {
                        _ = thread_token.cancelled() => {
                            debug!(%session, "stream closed by client");
                            return;
                        }
                        res = pump(&client, &url, session, &sink) => res
                    };

                    let kind = match outcome {
                        Ok(()) => SignalKind::Ended,
                        Err(e) => {
                            warn!(%session, "{e}");
                            SignalKind::Failed(e.to_string())
                        }
                    };
                    if !thread_token.is_cancelled() {
                        let _ = sink.send(StreamSignal { session, kind }).await;
                    }
                });
            })
            .context("spawning stream thread")?;

        Ok(HttpStreamHandle { token })
    }
}

/// Forward every `message` frame to `sink` until the body ends.
async fn pump(
    client: &Client,
    url: &str,
    session: SessionId,
    sink: &mpsc::Sender<StreamSignal>,
) -> Result<(), TransportError> {
    debug!(%session, url, "connecting");
    let resp = client
        .get(url)
        .header(ACCEPT, EVENT_STREAM)
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .map_err(TransportError::Connect)?;

    if !resp.status().is_success() {
        return Err(TransportError::Status(resp.status()));
    }

    let mut decoder = SseDecoder::new();
    let mut body = resp.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(TransportError::Body)?;
        for frame in decoder.push(&chunk) {
            if !frame.is_message() {
                debug!(%session, event = ?frame.event, "skipping non-message frame");
                continue;
            }
            let signal = StreamSignal {
                session,
                kind: SignalKind::Frame(frame.data),
            };
            if sink.send(signal).await.is_err() {
                // Receiver gone, nobody is listening anymore.
                return Ok(());
            }
        }
    }

    if decoder.has_partial() {
        debug!(%session, "discarding incomplete trailing frame");
    }
    Ok(())
}
