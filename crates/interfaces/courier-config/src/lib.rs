//! Central configuration constants for the simulator client.

/// Simulator used when neither `--url` nor the environment override is set.
pub const DEFAULT_SIMULATOR_URL: &str = "http://127.0.0.1:5000";

/// Environment variable overriding the simulator base URL.
pub const SIMULATOR_URL_ENV: &str = "COURIER_SIMULATOR_URL";

/// Upper bound on establishing the stream connection. The body itself is
/// unbounded since slow mode keeps it open for many seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Queue depth that renders as a full gauge.
pub const GAUGE_FULL_DEPTH: u64 = 2;

/// Minimum failure rate accepted by the slider.
pub const MIN_FAIL_RATE: u8 = 0;

/// Maximum failure rate accepted by the slider.
pub const MAX_FAIL_RATE: u8 = 100;

/// Capacity of the transport -> kernel signal channel.
pub const SIGNAL_CHANNEL_CAPACITY: usize = 100;

/// Clamp a slider value into the accepted failure-rate range.
pub fn clamp_fail_rate(v: i64) -> u8 {
    v.clamp(MIN_FAIL_RATE as i64, MAX_FAIL_RATE as i64) as u8
}

/// Simulator base URL, honouring [`SIMULATOR_URL_ENV`].
pub fn simulator_url() -> String {
    std::env::var(SIMULATOR_URL_ENV).unwrap_or_else(|_| DEFAULT_SIMULATOR_URL.to_owned())
}
