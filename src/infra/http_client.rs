//! HTTP client factory.
//!
//! Only the connect phase is bounded. Requests themselves have no client-side
//! timeout; the backend decides how long a call may take.

use reqwest::Client;
use std::time::Duration;

/// Connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub const USER_AGENT: &str = concat!("authgate/", env!("CARGO_PKG_VERSION"));

pub fn try_build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
}
