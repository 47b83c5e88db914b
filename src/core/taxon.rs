use crate::domain::model::TaxonKey;
use crate::domain::ports::TaxonMatcher;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Strip authority/date suffixes and synonym lists from a display name.
///
/// The parenthesis cut happens first, so commas inside `"(Girard, 1852)"`
/// never shorten the name.
pub fn clean_species_name(display_name: &str) -> String {
    let before_paren = display_name.split('(').next().unwrap_or_default();
    let before_comma = before_paren.split(',').next().unwrap_or_default();
    before_comma.trim().to_string()
}

/// Decides whether a cached registry answer is still usable.
pub trait ExpiryPolicy: Send + Sync {
    fn is_expired(&self, age: Duration) -> bool;
}

/// Entries live for the rest of the process. Memory grows with the number
/// of distinct species looked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverExpire;

impl ExpiryPolicy for NeverExpire {
    fn is_expired(&self, _age: Duration) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    key: Option<TaxonKey>,
    stored_at: Instant,
}

/// Per-process memo of registry answers, keyed by cleaned species name.
pub struct TaxonCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    policy: Box<dyn ExpiryPolicy>,
}

impl TaxonCache {
    pub fn new() -> Self {
        Self::with_policy(NeverExpire)
    }

    pub fn with_policy<P: ExpiryPolicy + 'static>(policy: P) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            policy: Box::new(policy),
        }
    }

    /// Outer `None` is a cache miss; `Some(None)` is a remembered "no such taxon".
    pub async fn get(&self, clean_name: &str) -> Option<Option<TaxonKey>> {
        let entries = self.entries.read().await;
        let entry = entries.get(clean_name)?;
        if self.policy.is_expired(entry.stored_at.elapsed()) {
            return None;
        }
        Some(entry.key.clone())
    }

    pub async fn insert(&self, clean_name: String, key: Option<TaxonKey>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            clean_name,
            CacheEntry {
                key,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for TaxonCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves species display names to registry identifiers, memoized.
pub struct TaxonResolver {
    matcher: Arc<dyn TaxonMatcher>,
    cache: Arc<TaxonCache>,
}

impl TaxonResolver {
    pub fn new(matcher: Arc<dyn TaxonMatcher>, cache: Arc<TaxonCache>) -> Self {
        Self { matcher, cache }
    }

    /// Registry answer for a display name. Transport failures come back as
    /// `Err` and are not cached; definite answers are.
    pub async fn lookup(&self, display_name: &str) -> Result<Option<TaxonKey>> {
        let clean_name = clean_species_name(display_name);
        if clean_name.is_empty() {
            return Ok(None);
        }

        if let Some(cached) = self.cache.get(&clean_name).await {
            tracing::debug!("🧬 Taxon cache hit for '{}'", clean_name);
            return Ok(cached);
        }

        // No lock is held across the request; a concurrent miss for the same
        // name may issue a second call and overwrite with the same answer.
        let key = self.matcher.match_name(&clean_name).await?;
        match &key {
            Some(k) => tracing::debug!("🧬 '{}' matched taxon key {}", clean_name, k),
            None => tracing::debug!("🧬 '{}' has no registry match", clean_name),
        }
        self.cache.insert(clean_name, key.clone()).await;
        Ok(key)
    }

    /// Same as [`lookup`](Self::lookup) with failures folded into "unresolved".
    pub async fn resolve(&self, display_name: &str) -> Option<TaxonKey> {
        match self.lookup(display_name).await {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("⚠️ Taxon lookup for '{}' failed: {}", display_name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AtlasError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingMatcher {
        calls: AtomicUsize,
        answer: Option<TaxonKey>,
        fail: bool,
    }

    impl CountingMatcher {
        fn answering(answer: Option<&str>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer: answer.map(|a| TaxonKey(a.to_string())),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer: None,
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TaxonMatcher for CountingMatcher {
        async fn match_name(&self, _clean_name: &str) -> Result<Option<TaxonKey>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AtlasError::UpstreamStatus {
                    url: "http://registry.test/species/match".to_string(),
                    status: 503,
                });
            }
            Ok(self.answer.clone())
        }
    }

    struct AlwaysExpired;

    impl ExpiryPolicy for AlwaysExpired {
        fn is_expired(&self, _age: Duration) -> bool {
            true
        }
    }

    #[test]
    fn test_clean_species_name() {
        assert_eq!(
            clean_species_name("Procambarus clarkii (Girard, 1852), syn. X"),
            "Procambarus clarkii"
        );
        assert_eq!(clean_species_name("Lagocephalus sceleratus"), "Lagocephalus sceleratus");
        assert_eq!(clean_species_name("Mnemiopsis leidyi, Ctenophora"), "Mnemiopsis leidyi");
        assert_eq!(clean_species_name("  (Linnaeus, 1758)"), "");
        assert_eq!(clean_species_name(""), "");
    }

    #[tokio::test]
    async fn test_resolution_is_memoized_per_clean_name() {
        let matcher = Arc::new(CountingMatcher::answering(Some("2227300")));
        let resolver = TaxonResolver::new(matcher.clone(), Arc::new(TaxonCache::new()));

        let first = resolver.resolve("Procambarus clarkii (Girard, 1852)").await;
        let second = resolver.resolve("Procambarus clarkii").await;

        assert_eq!(first, Some(TaxonKey("2227300".to_string())));
        assert_eq!(first, second);
        assert_eq!(matcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_definite_miss_is_memoized() {
        let matcher = Arc::new(CountingMatcher::answering(None));
        let resolver = TaxonResolver::new(matcher.clone(), Arc::new(TaxonCache::new()));

        assert_eq!(resolver.resolve("Nonexistus fictus").await, None);
        assert_eq!(resolver.resolve("Nonexistus fictus").await, None);
        assert_eq!(matcher.calls(), 1);
    }

    #[tokio::test]
    async fn test_failures_resolve_to_none_and_are_not_cached() {
        let matcher = Arc::new(CountingMatcher::failing());
        let cache = Arc::new(TaxonCache::new());
        let resolver = TaxonResolver::new(matcher.clone(), cache.clone());

        assert!(resolver.lookup("Procambarus clarkii").await.is_err());
        assert_eq!(resolver.resolve("Procambarus clarkii").await, None);
        assert_eq!(matcher.calls(), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_name_skips_registry() {
        let matcher = Arc::new(CountingMatcher::answering(Some("1")));
        let resolver = TaxonResolver::new(matcher.clone(), Arc::new(TaxonCache::new()));

        assert_eq!(resolver.resolve("  (Girard, 1852)").await, None);
        assert_eq!(matcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_expiry_policy_forces_refetch() {
        let matcher = Arc::new(CountingMatcher::answering(Some("7")));
        let cache = Arc::new(TaxonCache::with_policy(AlwaysExpired));
        let resolver = TaxonResolver::new(matcher.clone(), cache);

        resolver.resolve("Vespa velutina").await;
        resolver.resolve("Vespa velutina").await;
        assert_eq!(matcher.calls(), 2);
    }

    #[test]
    fn test_cache_round_trip_without_runtime_macro() {
        let cache = TaxonCache::new();
        tokio_test::block_on(async {
            assert_eq!(cache.get("Vespa velutina").await, None);
            cache
                .insert("Vespa velutina".to_string(), Some(TaxonKey("1311477".to_string())))
                .await;
            assert_eq!(
                cache.get("Vespa velutina").await,
                Some(Some(TaxonKey("1311477".to_string())))
            );
            assert_eq!(cache.len().await, 1);
        });
    }
}
