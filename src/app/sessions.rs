//! Registry of session keys issued by the start route
//!
//! The return route receives the session key back through the browser, so it
//! is untrusted input. When verification is enabled, a key is accepted only
//! if this process issued it within the TTL, and only once.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

/// Issued session keys with their issue time
#[derive(Debug)]
pub struct SessionRegistry {
    ttl: Duration,
    issued: Mutex<HashMap<String, Instant>>,
}

impl SessionRegistry {
    /// Empty registry
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            issued: Mutex::new(HashMap::new()),
        }
    }

    /// Record a newly issued key, pruning expired ones
    pub async fn issue(&self, session_key: &str) {
        let mut issued = self.issued.lock().await;
        let ttl = self.ttl;
        issued.retain(|_, at| at.elapsed() < ttl);
        issued.insert(session_key.to_string(), Instant::now());
        debug!("Issued session {} ({} outstanding)", session_key, issued.len());
    }

    /// Accept a returning key if it was issued and has not expired.
    /// The key is consumed either way.
    pub async fn redeem(&self, session_key: &str) -> bool {
        let mut issued = self.issued.lock().await;
        match issued.remove(session_key) {
            Some(at) => at.elapsed() < self.ttl,
            None => false,
        }
    }

    /// Number of outstanding keys, expired ones included
    pub async fn outstanding(&self) -> usize {
        self.issued.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issued_key_redeems_once() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        registry.issue("abc").await;

        assert!(registry.redeem("abc").await);
        assert!(!registry.redeem("abc").await);
    }

    #[tokio::test]
    async fn test_unknown_key_rejected() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        registry.issue("abc").await;

        assert!(!registry.redeem("forged").await);
        assert_eq!(registry.outstanding().await, 1);
    }

    #[tokio::test]
    async fn test_expired_key_rejected_and_pruned() {
        let registry = SessionRegistry::new(Duration::ZERO);
        registry.issue("old").await;
        assert!(!registry.redeem("old").await);

        registry.issue("a").await;
        registry.issue("b").await;
        assert_eq!(registry.outstanding().await, 1);
    }
}
