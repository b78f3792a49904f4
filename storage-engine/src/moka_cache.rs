use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use shared::{Result, TtlSecs};
use std::fmt::Debug;
use std::time::{Duration, Instant};
use tracker::ports::CacheStore;

/// Upper bound on entries; the tracker only ever writes one key.
const DEFAULT_MAX_ENTRIES: u64 = 1024;

#[derive(Clone, Debug)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires every entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Moka-based in-process cache store with per-entry TTL
/// Stands in for Redis when the service runs as a single instance
pub struct MokaStore {
    cache: Cache<String, Entry>,
}

impl MokaStore {
    pub fn new(name: &str, max_entries: Option<u64>) -> Self {
        let cache = Cache::builder()
            .name(name)
            .max_capacity(max_entries.unwrap_or(DEFAULT_MAX_ENTRIES))
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }
}

impl Default for MokaStore {
    fn default() -> Self {
        Self::new("tracker", None)
    }
}

#[async_trait]
impl CacheStore for MokaStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Expired entries are never returned, even before eviction runs
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set_ex(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()> {
        let entry = Entry {
            value,
            ttl: ttl.as_duration(),
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

impl Debug for MokaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaStore")
            .field("entry_count", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}
