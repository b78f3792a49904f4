pub mod coingecko;
pub mod domain;
pub mod ports;
pub mod services;

pub use coingecko::CoinGeckoClient;
pub use domain::{PriceQuote, PriceSnapshot, Sentiment, SentimentReading, Wisdom};
pub use ports::{CacheStore, PriceSource};
pub use services::PriceService;
