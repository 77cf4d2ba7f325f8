//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with the fixed per-request timeout.
//! System proxy env vars (HTTP_PROXY / HTTPS_PROXY / NO_PROXY) are honored
//! by reqwest's default proxy handling.

use reqwest::Client;
use std::time::Duration;

/// Timeout applied to every outbound Admin API request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a reqwest Client with the given timeout
pub fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ghostpost/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}
