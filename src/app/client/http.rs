//! Core HTTP operations with rate limiting and retry logic
//!
//! Every platform request goes through [`HttpHandler::send`], which applies the
//! rate limiter and retries transport failures, 429 and 503 with exponential
//! backoff. Other statuses are returned to the caller to interpret.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Jitter, Quota, RateLimiter};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::constants::limits;
use crate::errors::{PullError, SessionError};

/// Why a request gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryFailure {
    /// Still rate limited after all retries
    RateLimited,
    /// Transport kept failing
    Exhausted {
        /// Retries performed
        max_retries: u32,
    },
}

impl From<RetryFailure> for SessionError {
    fn from(failure: RetryFailure) -> Self {
        match failure {
            RetryFailure::RateLimited => SessionError::RateLimitExceeded,
            RetryFailure::Exhausted { max_retries } => {
                SessionError::MaxRetriesExceeded { max_retries }
            }
        }
    }
}

impl From<RetryFailure> for PullError {
    fn from(failure: RetryFailure) -> Self {
        match failure {
            RetryFailure::RateLimited => PullError::RateLimitExceeded,
            RetryFailure::Exhausted { max_retries } => PullError::MaxRetriesExceeded { max_retries },
        }
    }
}

/// HTTP operations handler with resilience patterns
#[derive(Debug)]
pub struct HttpHandler {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpHandler {
    /// Creates a new HttpHandler; `None` when the rate limit is zero
    pub fn new(client: Client, rate_limit_rps: u32) -> Option<Self> {
        let quota = Quota::per_second(NonZeroU32::new(rate_limit_rps)?);
        Some(Self {
            client,
            rate_limiter: RateLimiter::direct(quota),
        })
    }

    /// Sends a request with rate limiting and retry logic
    ///
    /// `build` is called once per attempt so the request can be rebuilt.
    /// A 503 that persists through all retries is returned as the response.
    pub async fn send<F>(&self, build: F) -> Result<Response, RetryFailure>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(50)))
            .await;

        let mut retries = 0;
        loop {
            match build(&self.client).send().await {
                Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                    if retries >= limits::MAX_RETRIES {
                        return Err(RetryFailure::RateLimited);
                    }
                    retries += 1;
                    let delay = backoff_delay(retries);
                    tracing::warn!(
                        "Rate limited by platform (429). Backing off for {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Ok(response)
                    if response.status() == StatusCode::SERVICE_UNAVAILABLE
                        && retries < limits::MAX_RETRIES =>
                {
                    retries += 1;
                    let delay = backoff_delay(retries);
                    tracing::warn!(
                        "Platform unavailable (503). Backing off for {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Ok(response) => {
                    tracing::debug!("{} {}", response.status(), response.url());
                    return Ok(response);
                }
                Err(e) if retries < limits::MAX_RETRIES => {
                    retries += 1;
                    let delay = backoff_delay(retries);
                    tracing::warn!(
                        "Request failed (attempt {}/{}): {}. Retrying in {}ms",
                        retries,
                        limits::MAX_RETRIES,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        "Request failed after {} retries: {}",
                        limits::MAX_RETRIES,
                        e
                    );
                    return Err(RetryFailure::Exhausted {
                        max_retries: limits::MAX_RETRIES,
                    });
                }
            }
        }
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(limits::RETRY_BASE_DELAY_MS * 2_u64.pow(attempt))
}
