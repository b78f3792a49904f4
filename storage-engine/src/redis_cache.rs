use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use shared::{Error, Result, TtlSecs};
use std::fmt::Debug;
use std::time::Duration;
use tracker::ports::CacheStore;

/// How long `/health` waits on PING before calling the store disconnected.
const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis-backed cache store.
///
/// `ConnectionManager` is a multiplexed connection that reconnects on its own;
/// clones share it, so every call clones instead of locking.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    url: String,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| Error::Cache(format!("invalid redis url '{url}': {e}")))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| Error::Cache(format!("redis connect failed: {e}")))?;

        Ok(Self {
            conn,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| Error::Cache(format!("GET {key} failed: {e}")))?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: String, ttl: TtlSecs) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(key, value, ttl.0)
            .await
            .map_err(|e| Error::Cache(format!("SETEX {key} failed: {e}")))?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let pong: String = tokio::time::timeout(PING_TIMEOUT, redis::cmd("PING").query_async(&mut conn))
            .await
            .map_err(|_| Error::Cache("PING timed out".to_string()))?
            .map_err(|e| Error::Cache(format!("PING failed: {e}")))?;

        if pong == "PONG" {
            Ok(())
        } else {
            Err(Error::Cache(format!("unexpected PING reply: {pong}")))
        }
    }
}

impl Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("url", &self.url)
            .finish()
    }
}
