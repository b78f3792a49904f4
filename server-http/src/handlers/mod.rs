pub mod health;
pub mod insights;
pub mod price;

pub use health::health_check;
pub use insights::{get_sentiment, get_wisdom};
pub use price::get_price;
