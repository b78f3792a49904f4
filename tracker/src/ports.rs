#![deny(clippy::all)]

use crate::domain::PriceSnapshot;
use async_trait::async_trait;
use shared::{Result, TtlSecs};

// Ports are the pluggable seams: where prices come from and where they are cached

/// Port for a key-value store that owns entry expiry (e.g. Redis)
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// `Ok(None)` on a miss or an expired entry.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    /// Store `value` under `key`; the store drops it after `ttl`.
    async fn set_ex(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()>;
    /// Round-trip to the store to prove it is reachable right now.
    async fn ping(&self) -> Result<()>;
}

/// Port for the upstream price API
#[async_trait]
pub trait PriceSource: Send + Sync + 'static {
    async fn fetch_price(&self) -> Result<PriceSnapshot>;
}
