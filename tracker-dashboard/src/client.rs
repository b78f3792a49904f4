use crate::config::Config;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared_http::api::{HealthResponse, PriceResponse, SentimentResponse, WisdomResponse};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    http_server: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.http_server.clone())
    }

    pub fn with_base_url(http_server: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            http_server: http_server.into(),
        }
    }

    pub fn http_server(&self) -> &str {
        &self.http_server
    }

    pub async fn check_health(&self) -> Result<HealthResponse, ClientError> {
        self.get_json("/health").await
    }

    pub async fn price(&self) -> Result<PriceResponse, ClientError> {
        self.get_json("/api/price").await
    }

    pub async fn sentiment(&self) -> Result<SentimentResponse, ClientError> {
        self.get_json("/api/sentiment").await
    }

    pub async fn wisdom(&self) -> Result<WisdomResponse, ClientError> {
        self.get_json("/api/wisdom").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.http_server, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        response
            .json()
            .await
            .map_err(|source| ClientError::Request { url, source })
    }
}
