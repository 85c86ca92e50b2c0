//! Tourdesk gateway
//!
//! Serves the reviews, bookings, coupons and tours list screens on top of
//! the booking backend.
//!
//! Usage: `tourdesk-gateway [config.yaml]` (or `TOURDESK_CONFIG=config.yaml`).
//! Without a file the default screens point at `http://localhost:5000/api`.

use anyhow::Result;
use tourdesk::config::AppConfig;
use tourdesk::server::ServerBuilder;
use tracing_subscriber::EnvFilter;

const ENV_CONFIG: &str = "TOURDESK_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tourdesk=info,tower_http=info")),
        )
        .init();

    let path = std::env::args().nth(1).or_else(|| std::env::var(ENV_CONFIG).ok());
    let config = AppConfig::load(path.as_deref())?;

    tracing::info!(
        backend = %config.api.base_url,
        config = path.as_deref().unwrap_or("<default>"),
        "Starting tourdesk gateway v{}",
        env!("CARGO_PKG_VERSION")
    );

    let bind = config.server.bind.clone();
    ServerBuilder::from_config(&config)?.serve(&bind).await
}
