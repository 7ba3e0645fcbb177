use std::time::Duration;

use reqwest::Client;

const USER_AGENT: &str = concat!("courier/", env!("CARGO_PKG_VERSION"));

/// Client for long-lived event streams. Only the connect phase is bounded.
pub fn default_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(courier_config::CONNECT_TIMEOUT_SECS))
        .tcp_nodelay(true)
        .build()
}
