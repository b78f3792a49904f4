pub mod moka_cache;
pub mod redis_cache;

pub use moka_cache::MokaStore;
pub use redis_cache::RedisStore;

use shared::config::CacheBackend;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracker::ports::CacheStore;

/// Open the configured cache tier.
///
/// `None` means the service runs without a cache: either it was disabled, or
/// the store could not be reached within `connect_timeout`. A store that
/// fails here is not retried for the lifetime of the process.
pub async fn open_store(
    backend: &CacheBackend,
    connect_timeout: Duration,
) -> Option<Arc<dyn CacheStore>> {
    match backend {
        CacheBackend::Disabled => {
            info!("Cache disabled, every price read goes upstream");
            None
        }
        CacheBackend::Memory => {
            info!("Using in-process Moka cache");
            Some(Arc::new(MokaStore::default()))
        }
        CacheBackend::Redis(url) => {
            match tokio::time::timeout(connect_timeout, RedisStore::connect(url)).await {
                Ok(Ok(store)) => {
                    info!("Connected to Redis at {}", store.url());
                    Some(Arc::new(store))
                }
                Ok(Err(e)) => {
                    warn!("Redis not available ({}), running without cache", e);
                    None
                }
                Err(_) => {
                    warn!(
                        "Redis did not answer within {:?}, running without cache",
                        connect_timeout
                    );
                    None
                }
            }
        }
    }
}
