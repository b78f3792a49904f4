use crate::domain::{Sentiment, SentimentReading};
use rand::Rng;

/// Mock market sentiment: a uniform index in [0, 100) and its bucket label.
pub fn sentiment() -> SentimentReading {
    let index = rand::rng().random_range(0..Sentiment::INDEX_RANGE);
    SentimentReading::new(index)
}
