//! BaZi mini-program API server.

use bazi_gateway::{build_app, AppState};
use bazi_core::BaziConfig;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    bazi_core::validate_tables()?;
    let config = BaziConfig::load()?;
    let addr = config.bind_addr();
    tracing::info!(
        "[SYSTEM] {} v{} starting ({})",
        config.app_name,
        bazi_core::version(),
        config.environment
    );

    let state = Arc::new(AppState::from_config(config)?);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("[SYSTEM] listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
