use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use server_http::{build_app, build_router, AppState};
use shared::config::{Config, Variant};
use shared::{Error, Result, TtlSecs};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storage_engine::MokaStore;
use tower::ServiceExt;
use tracker::services::{CACHE_KEY, RULES};
use tracker::{CacheStore, PriceService, PriceSnapshot, PriceSource, Sentiment};

struct FixedSource {
    calls: AtomicUsize,
    fail: bool,
}

impl FixedSource {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: true,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for FixedSource {
    async fn fetch_price(&self) -> Result<PriceSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Upstream("connection refused".into()));
        }
        Ok(PriceSnapshot::new(97000.0, 89000.0, 76000.0, 2.5, 1.92e12))
    }
}

/// A store that accepted the connection once and has since gone away.
struct DownStore;

#[async_trait]
impl CacheStore for DownStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Cache("connection refused".into()))
    }

    async fn set_ex(&self, _key: &str, _value: String, _ttl: TtlSecs) -> Result<()> {
        Err(Error::Cache("connection refused".into()))
    }

    async fn ping(&self) -> Result<()> {
        Err(Error::Cache("connection refused".into()))
    }
}

fn test_config(variant: Variant) -> Config {
    Config::from_lookup(variant, |_| None)
}

fn router_with(service: PriceService, cache_disabled: bool) -> Router {
    let variant = if cache_disabled {
        Variant::Standalone
    } else {
        Variant::Cached
    };
    build_router(AppState::new(service, cache_disabled), &test_config(variant))
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health_in_standalone_mode_reports_disabled() {
    let app = router_with(PriceService::uncached(FixedSource::ok()), true);

    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["redis"], "disabled (standalone mode)");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn health_reflects_cache_connectivity() {
    let connected = router_with(
        PriceService::new(FixedSource::ok(), Some(Arc::new(MokaStore::default()))),
        false,
    );
    let (_, json) = get_json(&connected, "/health").await;
    assert_eq!(json["redis"], "connected");

    let never_connected = router_with(PriceService::uncached(FixedSource::ok()), false);
    let (_, json) = get_json(&never_connected, "/health").await;
    assert_eq!(json["redis"], "disconnected");

    let gone_away = router_with(
        PriceService::new(FixedSource::ok(), Some(Arc::new(DownStore))),
        false,
    );
    let (_, json) = get_json(&gone_away, "/health").await;
    assert_eq!(json["redis"], "disconnected");
}

#[tokio::test]
async fn price_miss_then_hit() {
    let source = FixedSource::ok();
    let store = Arc::new(MokaStore::default());
    let app = router_with(PriceService::new(source.clone(), Some(store.clone())), false);

    let (status, first) = get_json(&app, "/api/price").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["cached"], false);
    assert_eq!(first["usd"], 97000.0);
    assert!(store.get(CACHE_KEY).await.unwrap().is_some());

    let (status, second) = get_json(&app, "/api/price").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["cached"], true);
    for field in ["usd", "eur", "gbp", "change_24h", "market_cap", "timestamp"] {
        assert_eq!(second[field], first[field], "field {field} differs");
    }
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn price_without_cache_is_never_cached() {
    let source = FixedSource::ok();
    let app = router_with(PriceService::uncached(source.clone()), true);

    let (_, first) = get_json(&app, "/api/price").await;
    let (_, second) = get_json(&app, "/api/price").await;
    assert_eq!(first["cached"], false);
    assert_eq!(second["cached"], false);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn price_survives_cache_outage() {
    let app = router_with(
        PriceService::new(FixedSource::ok(), Some(Arc::new(DownStore))),
        false,
    );

    let (status, json) = get_json(&app, "/api/price").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["cached"], false);
}

#[tokio::test]
async fn price_upstream_failure_is_generic_500() {
    let app = router_with(
        PriceService::new(FixedSource::failing(), Some(Arc::new(MokaStore::default()))),
        false,
    );

    let (status, json) = get_json(&app, "/api/price").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to fetch Bitcoin price");
    assert!(json.get("usd").is_none());
    assert!(json.get("cached").is_none());
}

#[tokio::test]
async fn sentiment_index_and_label_agree() {
    let app = router_with(PriceService::uncached(FixedSource::ok()), true);

    for _ in 0..50 {
        let (status, json) = get_json(&app, "/api/sentiment").await;
        assert_eq!(status, StatusCode::OK);

        let index = json["index"].as_u64().unwrap();
        assert!(index < 100);
        let expected = Sentiment::from_index(index as u8);
        assert_eq!(json["sentiment"], expected.label());
        assert!(json["timestamp"].is_string());
    }
}

#[tokio::test]
async fn wisdom_comes_from_the_rule_list() {
    let app = router_with(PriceService::uncached(FixedSource::ok()), true);

    for _ in 0..50 {
        let (status, json) = get_json(&app, "/api/wisdom").await;
        assert_eq!(status, StatusCode::OK);
        assert!(RULES.contains(&json["rule"].as_str().unwrap()));
        assert_eq!(json["source"], "Michael Saylor's 21 Rules of Bitcoin");
    }
}

#[tokio::test]
async fn trailing_slash_is_normalized() {
    let state = AppState::new(PriceService::uncached(FixedSource::ok()), true);
    let app = build_app(state, &test_config(Variant::Standalone));

    let response = app
        .oneshot(Request::builder().uri("/health/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = router_with(PriceService::uncached(FixedSource::ok()), true);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/wisdom")
                .header(header::ORIGIN, "http://dashboard.local")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = router_with(PriceService::uncached(FixedSource::ok()), true);

    let response = app
        .oneshot(Request::builder().uri("/api/unknown").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
