//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the HTTP client
//! used to talk to the data-sharing platform.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::{http, limits, platform};

/// Configuration for the platform client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Platform REST API base URL
    pub api_base_url: String,
    /// Guest (web) share page
    pub guest_share_url: String,
    /// Consent application deep link
    pub consent_share_url: String,
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Connection pool idle timeout
    pub pool_idle_timeout: Option<Duration>,
    /// Maximum number of idle connections per host
    pub pool_max_per_host: usize,
    /// Rate limit (requests per second)
    pub rate_limit_rps: u32,
    /// Files fetched concurrently during a pull
    pub pull_concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: platform::API_BASE_URL.to_string(),
            guest_share_url: platform::GUEST_SHARE_URL.to_string(),
            consent_share_url: platform::CONSENT_SHARE_URL.to_string(),
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            pool_idle_timeout: Some(http::POOL_IDLE_TIMEOUT),
            pool_max_per_host: http::POOL_MAX_PER_HOST,
            rate_limit_rps: limits::DEFAULT_RATE_LIMIT_RPS,
            pull_concurrency: limits::DEFAULT_PULL_CONCURRENCY,
        }
    }
}

impl ClientConfig {
    /// Builds the HTTP client with the specified configuration
    pub fn build_http_client(&self) -> reqwest::Result<Client> {
        let mut client_builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(http::USER_AGENT)
            .tcp_nodelay(true)
            .pool_max_idle_per_host(self.pool_max_per_host);

        if let Some(idle_timeout) = self.pool_idle_timeout {
            client_builder = client_builder.pool_idle_timeout(idle_timeout);
        }

        client_builder.build()
    }
}
