use std::time::Duration;
use tracing::warn;

/// Which deployment the binary is running as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Price reads go through the cache tier.
    Cached,
    /// No cache tier at all; every price read hits upstream.
    Standalone,
}

impl Variant {
    pub fn default_port(&self) -> u16 {
        match self {
            Variant::Cached => 3000,
            Variant::Standalone => 8888,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    Redis(String), // url
    Memory,
    Disabled,
}

impl CacheBackend {
    pub fn is_disabled(&self) -> bool {
        matches!(self, CacheBackend::Disabled)
    }

    pub fn name(&self) -> &str {
        match self {
            CacheBackend::Redis(_) => "redis",
            CacheBackend::Memory => "memory",
            CacheBackend::Disabled => "disabled",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub variant: Variant,
    pub host: String,
    pub port: u16,
    pub cache: CacheBackend,
    pub cache_connect_timeout: Duration,
    pub price_api_url: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_REDIS_URL: &'static str = "redis://localhost:6379";
    pub const DEFAULT_PRICE_API_URL: &'static str = "https://api.coingecko.com/api/v3/simple/price";
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

    pub fn from_env(variant: Variant) -> Self {
        Self::from_lookup(variant, |key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(variant: Variant, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!(
                    "PORT={} is not a valid port, using {}",
                    raw,
                    variant.default_port()
                );
                variant.default_port()
            }),
            None => variant.default_port(),
        };

        let redis_url = lookup("REDIS_URL").unwrap_or_else(|| Self::DEFAULT_REDIS_URL.to_string());

        let cache = match variant {
            Variant::Standalone => CacheBackend::Disabled,
            Variant::Cached => match lookup("CACHE_BACKEND")
                .map(|s| s.trim().to_ascii_lowercase())
                .as_deref()
            {
                None | Some("redis") => CacheBackend::Redis(redis_url),
                Some("memory") => CacheBackend::Memory,
                Some("disabled") | Some("none") => CacheBackend::Disabled,
                Some(other) => {
                    warn!("Unknown CACHE_BACKEND '{}', falling back to redis", other);
                    CacheBackend::Redis(redis_url)
                }
            },
        };

        let connect_timeout_secs = lookup("CACHE_CONNECT_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_CONNECT_TIMEOUT_SECS);

        Self {
            variant,
            host: lookup("HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            port,
            cache,
            cache_connect_timeout: Duration::from_secs(connect_timeout_secs),
            price_api_url: lookup("PRICE_API_URL")
                .unwrap_or_else(|| Self::DEFAULT_PRICE_API_URL.to_string()),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(variant: Variant, vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(variant, |key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_per_variant() {
        let cached = config_with(Variant::Cached, &[]);
        assert_eq!(cached.port, 3000);
        assert_eq!(
            cached.cache,
            CacheBackend::Redis("redis://localhost:6379".to_string())
        );
        assert_eq!(cached.price_api_url, Config::DEFAULT_PRICE_API_URL);
        assert!(cached.allows_any_origin());

        let standalone = config_with(Variant::Standalone, &[]);
        assert_eq!(standalone.port, 8888);
        assert_eq!(standalone.cache, CacheBackend::Disabled);
    }

    #[test]
    fn test_env_overrides() {
        let config = config_with(
            Variant::Cached,
            &[
                ("PORT", "9000"),
                ("REDIS_URL", "redis://cache:6380"),
                ("HOST", "127.0.0.1"),
                ("ALLOWED_ORIGINS", "http://a.test, http://b.test"),
            ],
        );
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(
            config.cache,
            CacheBackend::Redis("redis://cache:6380".to_string())
        );
        assert_eq!(
            config.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = config_with(Variant::Standalone, &[("PORT", "not-a-port")]);
        assert_eq!(config.port, 8888);
    }

    #[test]
    fn test_standalone_ignores_cache_backend() {
        let config = config_with(Variant::Standalone, &[("CACHE_BACKEND", "memory")]);
        assert!(config.cache.is_disabled());
    }

    #[test]
    fn test_cache_backend_selection() {
        assert_eq!(
            config_with(Variant::Cached, &[("CACHE_BACKEND", "Memory")]).cache,
            CacheBackend::Memory
        );
        assert!(
            config_with(Variant::Cached, &[("CACHE_BACKEND", "disabled")])
                .cache
                .is_disabled()
        );
        assert_eq!(
            config_with(Variant::Cached, &[("CACHE_BACKEND", "bogus")])
                .cache
                .name(),
            "redis"
        );
    }
}
