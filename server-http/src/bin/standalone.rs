//! Single-process variant: no cache tier, every price read goes upstream.

use server_http::server;
use shared::config::Variant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::run(Variant::Standalone).await
}
