use std::collections::HashMap;

use crate::domain::PriceSnapshot;
use crate::ports::PriceSource;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{Error, Result};
use tracing::debug;

/// CoinGecko asset id for Bitcoin.
pub const ASSET_ID: &str = "bitcoin";
const VS_CURRENCIES: &str = "usd,eur,gbp";

/// CoinGecko-backed price source.
/// Fetches BTC spot prices in USD/EUR/GBP plus 24h change and market cap via `/simple/price`.
#[derive(Clone, Debug)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

/// One asset's entry in a `/simple/price` response. CoinGecko sends more keys
/// (e.g. `eur_market_cap`); only these are read.
#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: f64,
    eur: f64,
    gbp: f64,
    usd_24h_change: f64,
    usd_market_cap: f64,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Parse a `/simple/price` body like `{ "bitcoin": {"usd": 97000.0, ...} }`.
    pub fn normalize(body: &[u8]) -> Result<PriceSnapshot> {
        let mut parsed: HashMap<String, SimplePrice> = serde_json::from_slice(body)
            .map_err(|e| Error::Upstream(format!("coingecko: parse JSON failed: {e}")))?;

        let price = parsed
            .remove(ASSET_ID)
            .ok_or_else(|| Error::Upstream(format!("coingecko: id missing in response: {ASSET_ID}")))?;

        Ok(PriceSnapshot::new(
            price.usd,
            price.eur,
            price.gbp,
            price.usd_24h_change,
            price.usd_market_cap,
        ))
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch_price(&self) -> Result<PriceSnapshot> {
        debug!("Requesting {} from {}", ASSET_ID, self.base_url);

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("ids", ASSET_ID),
                ("vs_currencies", VS_CURRENCIES),
                ("include_24hr_change", "true"),
                ("include_market_cap", "true"),
            ])
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("coingecko: request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::Upstream(format!("coingecko: non-success status: {e}")))?;

        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Upstream(format!("coingecko: read body failed: {e}")))?;

        Self::normalize(&body)
    }
}
