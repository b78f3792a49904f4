use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub http_server: String,
    pub refresh_interval: Duration,
}

const DEFAULT_HTTP_SERVER: &str = "http://localhost:3000";
const DEFAULT_REFRESH_SECS: u64 = 30;

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_server = lookup("TRACKER_HTTP_SERVER")
            .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string())
            .trim_end_matches('/')
            .to_string();

        // Zero would make tokio's interval panic
        let refresh_secs = lookup("DASHBOARD_REFRESH_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REFRESH_SECS);

        Self {
            http_server,
            refresh_interval: Duration::from_secs(refresh_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.http_server, "http://localhost:3000");
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides_and_invalid_interval() {
        let config = Config::from_lookup(|key| match key {
            "TRACKER_HTTP_SERVER" => Some("http://api.local:8888/".to_string()),
            "DASHBOARD_REFRESH_SECS" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config.http_server, "http://api.local:8888");
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
    }
}
