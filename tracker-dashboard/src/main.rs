use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracker_dashboard::{render::render, ApiClient, Config, DashboardPoller};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    let config = Config::from_env();
    let client = ApiClient::new(&config);

    match client.check_health().await {
        Ok(health) => info!(
            "Connected to {} (status: {}, cache: {})",
            client.http_server(),
            health.status,
            health.redis
        ),
        Err(e) => warn!("Health check failed, polling anyway: {}", e),
    }

    info!(
        "Refreshing every {}s, Ctrl+C to stop",
        config.refresh_interval.as_secs()
    );

    let handle = DashboardPoller::new(client, config.refresh_interval).start();
    let mut updates = handle.subscribe();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(state) = updates.borrow_and_update().as_ref() {
                    println!("{}", render(state));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C signal");
                break;
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}
