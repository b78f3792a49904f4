use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Timestamps go over the wire as RFC 3339 UTC with millisecond precision,
/// e.g. `2025-01-01T12:00:00.000Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Current time, truncated to what survives a trip through `iso_millis`.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Point-in-time Bitcoin price, as stored in the cache and returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub usd: f64,
    pub eur: f64,
    pub gbp: f64,
    pub change_24h: f64,
    pub market_cap: f64,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn new(usd: f64, eur: f64, gbp: f64, change_24h: f64, market_cap: f64) -> Self {
        Self {
            usd,
            eur,
            gbp,
            change_24h,
            market_cap,
            timestamp: now_millis(),
        }
    }
}

/// A snapshot together with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceQuote {
    pub snapshot: PriceSnapshot,
    pub cached: bool,
}

impl PriceQuote {
    pub fn fresh(snapshot: PriceSnapshot) -> Self {
        Self {
            snapshot,
            cached: false,
        }
    }

    pub fn from_cache(snapshot: PriceSnapshot) -> Self {
        Self {
            snapshot,
            cached: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "Extreme Fear")]
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    #[serde(rename = "Extreme Greed")]
    ExtremeGreed,
}

impl Sentiment {
    /// Exclusive upper bound of the index range.
    pub const INDEX_RANGE: u8 = 100;

    /// Buckets of width 20: [0,20) [20,40) [40,60) [60,80) [80,100).
    pub fn from_index(index: u8) -> Self {
        match index {
            0..20 => Sentiment::ExtremeFear,
            20..40 => Sentiment::Fear,
            40..60 => Sentiment::Neutral,
            60..80 => Sentiment::Greed,
            _ => Sentiment::ExtremeGreed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::ExtremeFear => "Extreme Fear",
            Sentiment::Fear => "Fear",
            Sentiment::Neutral => "Neutral",
            Sentiment::Greed => "Greed",
            Sentiment::ExtremeGreed => "Extreme Greed",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SentimentReading {
    pub index: u8,
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
}

impl SentimentReading {
    pub fn new(index: u8) -> Self {
        Self {
            index,
            sentiment: Sentiment::from_index(index),
            timestamp: now_millis(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wisdom {
    pub rule: &'static str,
    pub source: &'static str,
}
