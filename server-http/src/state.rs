use shared::config::Config;
use shared_http::api::cache_status;
use std::sync::Arc;
use tracker::{CoinGeckoClient, PriceService};

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub price_service: Arc<PriceService>,
    /// Set when the deployment has no cache tier by configuration, as opposed
    /// to one that failed to connect.
    pub cache_disabled: bool,
}

impl AppState {
    pub fn new(price_service: PriceService, cache_disabled: bool) -> Self {
        Self {
            price_service: Arc::new(price_service),
            cache_disabled,
        }
    }

    /// Wire the CoinGecko client and the configured cache tier.
    pub async fn from_config(config: &Config) -> Self {
        let source = Arc::new(CoinGeckoClient::new(config.price_api_url.clone()));
        let cache = storage_engine::open_store(&config.cache, config.cache_connect_timeout).await;

        Self::new(PriceService::new(source, cache), config.cache.is_disabled())
    }

    /// Cache connectivity as of this call, for `/health`.
    pub async fn cache_status(&self) -> &'static str {
        if self.cache_disabled {
            return cache_status::DISABLED;
        }

        match self.price_service.cache() {
            Some(store) => match store.ping().await {
                Ok(()) => cache_status::CONNECTED,
                Err(e) => {
                    tracing::warn!("Cache ping failed: {}", e);
                    cache_status::DISCONNECTED
                }
            },
            None => cache_status::DISCONNECTED,
        }
    }
}
