use crate::domain::{PriceQuote, PriceSnapshot};
use crate::ports::{CacheStore, PriceSource};
use shared::{Result, TtlSecs};
use std::sync::Arc;
use tracing::{info, warn};

/// Key the snapshot is cached under.
pub const CACHE_KEY: &str = "btc_price";
/// Lifetime of the cached snapshot; expiry is left to the store.
pub const CACHE_TTL: TtlSecs = TtlSecs(60);

/// Cache-aside read path in front of the upstream price source.
///
/// Concurrent misses are not coalesced: each one calls upstream and
/// overwrites the key.
#[derive(Clone)]
pub struct PriceService {
    source: Arc<dyn PriceSource>,
    cache: Option<Arc<dyn CacheStore>>,
}

impl PriceService {
    pub fn new(source: Arc<dyn PriceSource>, cache: Option<Arc<dyn CacheStore>>) -> Self {
        Self { source, cache }
    }

    /// Service with no cache tier; every call goes upstream.
    pub fn uncached(source: Arc<dyn PriceSource>) -> Self {
        Self::new(source, None)
    }

    pub fn cache(&self) -> Option<&Arc<dyn CacheStore>> {
        self.cache.as_ref()
    }

    pub async fn get_price(&self) -> Result<PriceQuote> {
        if let Some(snapshot) = self.read_cached().await {
            info!("Cache hit for '{}'", CACHE_KEY);
            return Ok(PriceQuote::from_cache(snapshot));
        }

        info!("Fetching price from upstream");
        let snapshot = self.source.fetch_price().await?;

        self.write_cached(&snapshot).await;

        Ok(PriceQuote::fresh(snapshot))
    }

    /// Any cache failure reads as a miss.
    async fn read_cached(&self) -> Option<PriceSnapshot> {
        let cache = self.cache.as_ref()?;

        let raw = match cache.get(CACHE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed, treating as miss: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Discarding undecodable cache entry '{}': {}", CACHE_KEY, e);
                None
            }
        }
    }

    /// Write failures are logged and swallowed.
    async fn write_cached(&self, snapshot: &PriceSnapshot) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };

        let value = match serde_json::to_string(snapshot) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to encode snapshot for cache: {}", e);
                return;
            }
        };

        if let Err(e) = cache.set_ex(CACHE_KEY, value, CACHE_TTL).await {
            warn!("Cache write failed: {}", e);
        }
    }
}

impl std::fmt::Debug for PriceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceService")
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
