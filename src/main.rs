use anyhow::Result;
use job_search::{start_web_server, AppConfig};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("job_search=info,rocket::server=off")),
        )
        .init();

    let config = AppConfig::load()?;

    info!("Starting Job Listings Search API Server");
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Server: http://0.0.0.0:{}", config.port);

    start_web_server(config).await
}
