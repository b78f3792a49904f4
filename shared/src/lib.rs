// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("upstream: {0}")]
    Upstream(String),
    #[error("cache: {0}")]
    Cache(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Lifetime of a cache entry, enforced by the store rather than the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlSecs(pub u64);

impl TtlSecs {
    pub fn as_duration(self) -> std::time::Duration {
        std::time::Duration::from_secs(self.0)
    }
}

pub mod config;
