use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracker::domain::iso_millis;
use tracker::{PriceQuote, PriceSnapshot, Sentiment, SentimentReading, Wisdom};

pub const STATUS_HEALTHY: &str = "healthy";

/// Cache connectivity as reported by `/health`.
pub mod cache_status {
    pub const CONNECTED: &str = "connected";
    pub const DISCONNECTED: &str = "disconnected";
    pub const DISABLED: &str = "disabled (standalone mode)";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub redis: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

/// Body of `/api/price`: the snapshot fields plus where they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
    #[serde(flatten)]
    pub snapshot: PriceSnapshot,
    pub cached: bool,
}

impl From<PriceQuote> for PriceResponse {
    fn from(quote: PriceQuote) -> Self {
        Self {
            snapshot: quote.snapshot,
            cached: quote.cached,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResponse {
    pub index: u8,
    pub sentiment: Sentiment,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl From<SentimentReading> for SentimentResponse {
    fn from(reading: SentimentReading) -> Self {
        Self {
            index: reading.index,
            sentiment: reading.sentiment,
            timestamp: reading.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WisdomResponse {
    pub rule: String,
    pub source: String,
}

impl From<Wisdom> for WisdomResponse {
    fn from(wisdom: Wisdom) -> Self {
        Self {
            rule: wisdom.rule.to_string(),
            source: wisdom.source.to_string(),
        }
    }
}

// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
