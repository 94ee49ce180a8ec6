//! Blocking HTTP client

use reqwest::blocking::Client;
use std::time::Duration;

/// Sent with every request so mirror operators can identify the traffic
pub const USER_AGENT: &str = concat!("pdfboxlab/", env!("CARGO_PKG_VERSION"));

/// Client whose requests fail after `timeout` (connect plus body)
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(timeout.min(Duration::from_secs(30)))
        .timeout(timeout)
        .build()
}
