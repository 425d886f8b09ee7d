//! Time-bounded verification cache
//!
//! Caches the last verification decision per identity so repeated
//! join/kill traffic does not hammer the backend. Entries older than the
//! freshness window are never served; they trigger a fresh lookup whose
//! result (including the fail-open/fail-closed fallback) is stored with
//! the current timestamp. Entries are only ever overwritten, never
//! deleted, unless a maximum entry count is configured.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use fraggate_core::SteamId64;

/// Last known verification decision for one identity.
#[derive(Debug, Clone, Copy)]
pub struct VerificationEntry {
    pub allow: bool,
    pub observed_at: Instant,
}

/// Process-wide identity -> verification decision cache.
pub struct VerificationCache {
    entries: RwLock<HashMap<SteamId64, VerificationEntry>>,
    ttl: Duration,
    max_entries: Option<usize>,
}

impl VerificationCache {
    pub fn new(ttl: Duration, max_entries: Option<usize>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            max_entries,
        }
    }

    /// Return the cached decision if fresh, otherwise call `refresh`,
    /// store its result with the current timestamp, and return it.
    ///
    /// `refresh` is responsible for resolving backend failures to the
    /// configured fail-open/fail-closed default; whatever it returns is
    /// cached for the full freshness window.
    pub async fn lookup_or_refresh<F, Fut>(&self, identity: SteamId64, refresh: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&identity) {
                if entry.observed_at.elapsed() < self.ttl {
                    return entry.allow;
                }
            }
        }

        let allow = refresh().await;

        let mut entries = self.entries.write().await;
        if let Some(max) = self.max_entries {
            if entries.len() >= max && !entries.contains_key(&identity) {
                evict_stalest(&mut entries);
            }
        }
        entries.insert(
            identity,
            VerificationEntry {
                allow,
                observed_at: Instant::now(),
            },
        );
        allow
    }

    /// Number of cached decisions
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

fn evict_stalest(entries: &mut HashMap<SteamId64, VerificationEntry>) {
    let stalest = entries
        .iter()
        .min_by_key(|(_, entry)| entry.observed_at)
        .map(|(id, _)| *id);
    if let Some(id) = stalest {
        entries.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_skips_refresh() {
        let cache = VerificationCache::new(TTL, None);
        let calls = AtomicUsize::new(0);

        let first = cache
            .lookup_or_refresh(42, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
            .await;
        let second = cache
            .lookup_or_refresh(42, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                false
            })
            .await;

        assert!(first);
        assert!(second, "fresh entry must be served, not refreshed");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_triggers_refresh() {
        let cache = VerificationCache::new(TTL, None);
        let calls = AtomicUsize::new(0);

        cache
            .lookup_or_refresh(42, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
            .await;

        tokio::time::advance(TTL + Duration::from_secs(1)).await;

        let refreshed = cache
            .lookup_or_refresh(42, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                false
            })
            .await;

        assert!(!refreshed);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_decision_is_cached() {
        // A refresh that resolved to the fail-closed default occupies the
        // cache for the full window, like any other decision.
        let cache = VerificationCache::new(TTL, None);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let allow = cache
                .lookup_or_refresh(7, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    false
                })
                .await;
            assert!(!allow);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capped_cache_evicts_stalest() {
        let cache = VerificationCache::new(TTL, Some(2));

        cache.lookup_or_refresh(1, || async { true }).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.lookup_or_refresh(2, || async { true }).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.lookup_or_refresh(3, || async { true }).await;

        assert_eq!(cache.len().await, 2);

        // Identity 1 was the stalest; looking it up again must refresh.
        let calls = AtomicUsize::new(0);
        cache
            .lookup_or_refresh(1, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
