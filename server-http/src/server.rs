use crate::routes::build_app;
use crate::state::AppState;
use axum::extract::Request;
use axum::ServiceExt;
use shared::config::{Config, Variant};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Boot one deployment variant and serve until Ctrl+C / SIGTERM.
pub async fn run(variant: Variant) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Bitcoin Price API ({:?})...", variant);

    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    let config = Config::from_env(variant);
    info!(
        "Cache backend: {}, upstream: {}",
        config.cache.name(),
        config.price_api_url
    );

    let state = AppState::from_config(&config).await;
    let app = build_app(state, &config);

    let listener = TcpListener::bind(config.bind_addr()).await?;

    info!("Bitcoin Price API running on http://{}", config.bind_addr());
    info!("Endpoints:");
    info!("   GET /health - Health check");
    info!("   GET /api/price - Get Bitcoin price");
    info!("   GET /api/sentiment - Get market sentiment");
    info!("   GET /api/wisdom - Get Saylor's wisdom");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }

    info!("Shutting down gracefully...");
}
