//! In-memory password cache
//!
//! Passwords are keyed by `host:port` and live until [`CredentialCache::clear`]
//! is called on shutdown. Nothing is persisted. Values are zeroized on drop.

use std::collections::HashMap;
use std::future::Future;

use parking_lot::RwLock;
use zeroize::Zeroizing;

use crate::sync::host::Prompt;

use super::types::ServerIdentity;

/// Process-wide map from server identity to a previously entered password
#[derive(Default)]
pub struct CredentialCache {
    secrets: RwLock<HashMap<ServerIdentity, Zeroizing<String>>>,
}

impl CredentialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached secret, or run `prompt` once and cache a non-empty answer.
    ///
    /// An empty or cancelled answer yields [`Prompt::Cancelled`] and caches nothing.
    pub async fn get_or_prompt<F, Fut>(
        &self,
        identity: &ServerIdentity,
        prompt: F,
    ) -> Prompt<Zeroizing<String>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Prompt<String>>,
    {
        if let Some(secret) = self.get(identity) {
            tracing::debug!("Using cached credential for {}", identity);
            return Prompt::Value(secret);
        }

        match prompt().await {
            Prompt::Value(secret) if !secret.is_empty() => {
                let secret = Zeroizing::new(secret);
                self.secrets.write().insert(identity.clone(), secret.clone());
                tracing::info!("Cached credential for {}", identity);
                Prompt::Value(secret)
            }
            Prompt::Value(_) | Prompt::Cancelled => {
                tracing::debug!("Credential entry cancelled for {}", identity);
                Prompt::Cancelled
            }
        }
    }

    pub fn get(&self, identity: &ServerIdentity) -> Option<Zeroizing<String>> {
        self.secrets.read().get(identity).cloned()
    }

    pub fn contains(&self, identity: &ServerIdentity) -> bool {
        self.secrets.read().contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.secrets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.read().is_empty()
    }

    /// Forget every cached secret (shutdown)
    pub fn clear(&self) {
        let mut secrets = self.secrets.write();
        tracing::info!("Clearing {} cached credential(s)", secrets.len());
        secrets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn identity() -> ServerIdentity {
        ServerIdentity::new("h1", 22)
    }

    #[tokio::test]
    async fn test_prompts_at_most_once() {
        let cache = CredentialCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let secret = cache
                .get_or_prompt(&identity(), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Prompt::Value("hunter2".to_string())
                })
                .await;
            assert_eq!(secret.value().map(|s| s.as_str()), Some("hunter2"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains(&identity()));
    }

    #[tokio::test]
    async fn test_cancelled_is_not_cached() {
        let cache = CredentialCache::new();

        let result = cache
            .get_or_prompt(&identity(), || async { Prompt::Cancelled })
            .await;
        assert!(result.is_cancelled());

        let result = cache
            .get_or_prompt(&identity(), || async { Prompt::Value(String::new()) })
            .await;
        assert!(result.is_cancelled());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_identities_are_independent() {
        let cache = CredentialCache::new();
        let other = ServerIdentity::new("h1", 2222);

        cache
            .get_or_prompt(&identity(), || async { Prompt::Value("a".to_string()) })
            .await;
        let second = cache
            .get_or_prompt(&other, || async { Prompt::Value("b".to_string()) })
            .await;

        assert_eq!(second.value().map(|s| s.as_str()), Some("b"));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = CredentialCache::new();
        cache
            .get_or_prompt(&identity(), || async { Prompt::Value("a".to_string()) })
            .await;

        cache.clear();
        assert!(cache.get(&identity()).is_none());
    }
}
