//! Crop Variety Tracker - Backend Server

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crop_variety_backend::{config::Config, create_app, AppState, VarietyStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "crop_variety_server=debug,crop_variety_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Crop Variety Tracker server");
    tracing::info!("Environment: {}", config.environment);

    let store = match config.store.seed_sample_data {
        true => VarietyStore::seeded(),
        false => VarietyStore::new(),
    };
    let store = store.with_strict_validation(config.validation.strict);

    tracing::info!(
        varieties = store.count().await,
        strict = config.validation.strict,
        "Variety store ready"
    );

    let addr = config.server.addr()?;
    let state = AppState {
        store,
        config: Arc::new(config),
    };

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
