pub mod price_service;
pub mod sentiment;
pub mod wisdom;

pub use price_service::{CACHE_KEY, CACHE_TTL, PriceService};
pub use sentiment::sentiment;
pub use wisdom::{RULES, SOURCE, wisdom};
