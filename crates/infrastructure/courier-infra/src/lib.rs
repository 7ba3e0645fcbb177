pub mod net;
mod runtime;
pub mod sse;
pub mod transport;

// Re-exports for convenience
pub use net::default_http_client;
pub use sse::{SseDecoder, SseFrame};
pub use transport::{HttpStreamHandle, HttpStreamTransport, TransportError};
