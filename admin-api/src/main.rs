use admin_api::config::Config;
use admin_api::middleware::RoleAuthorizer;
use admin_api::services::RedisSettingsService;
use admin_api::{build_router, store, AppState};
use anyhow::Context;
use redis_utils::{ProbeConfig, RedisPingProbe};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "admin_api=debug,redis_utils=info,audit=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    tracing::info!("Configuration loaded successfully");

    let settings_store = store::open_store(&config.settings)
        .await
        .context("Failed to open settings store")?;

    let probe = Arc::new(RedisPingProbe::new(ProbeConfig::with_timeout(
        config.probe.timeout(),
    )));

    let state = AppState {
        settings: Arc::new(RedisSettingsService::new(settings_store, probe)),
        authorizer: Arc::new(RoleAuthorizer),
        config: config.clone(),
    };

    let current = state.settings.current().await?;
    tracing::info!(server_url = %current.server_url, "Redis server setting loaded");

    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
