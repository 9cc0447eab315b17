mod analysis;
mod config;
mod error;
mod handlers;
mod llm;
mod routes;
mod state;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, Credentials, SystemConfig};
use state::AppState;

/// Full application router with CORS and request tracing
fn app(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Bind the configured host and port. Hostnames such as `localhost` are resolved.
async fn bind_listener(system_config: &SystemConfig) -> std::io::Result<TcpListener> {
    TcpListener::bind((system_config.host.as_str(), system_config.port)).await
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("codedoc_backend=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (config, loaded_path) = Config::discover()?;
    match loaded_path {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }
    config.validate()?;

    // The service refuses to start without a credential
    let credentials = Credentials::from_env(&config.llm_config)?;

    let app_state = AppState::new(config.clone(), credentials)?;

    let listener = bind_listener(&config.system_config).await?;
    info!(
        "Starting {} on {} (model={})",
        handlers::SERVICE_NAME,
        listener.local_addr()?,
        config.llm_config.model
    );

    axum::serve(listener, app(app_state)).await?;

    Ok(())
}
