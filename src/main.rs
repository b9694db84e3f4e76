use anyhow::{Context, Result};
use site_content::config::Config;
use site_content::server::{build_router, AppState};
use site_content::transition::{self, EngineConfig};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_content=info".parse()?),
        )
        .init();

    info!("Starting site content service");

    let config = Config::from_env()?;

    transition::initialize(EngineConfig::default());

    let state = Arc::new(AppState::from_config(&config)?);
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
