use std::sync::Arc;

use axum::{Router, middleware::from_fn};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::{
    common::{app_state::AppState, server_error::ServerError},
    config::config::AppConfig,
    health::{db::Connector, handlers::health_routes},
    mw::request_mw::request_mw,
};

mod common;
mod config;
mod health;
mod mw;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // Initialize .env
    dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global tracing: {}", e);
    }

    if config.database_url().is_none() {
        warn!("DASHBOARD__DATABASE_URL is not set, health checks will report missing configuration");
    }

    // Initialize state
    let state = AppState::from_config(&config);
    let app = app_routes(state);

    // Initialize webserver
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;

    info!("Server listening on address: {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn app_routes<C: Connector>(state: Arc<AppState<C>>) -> Router {
    Router::new()
        .nest("/health", health_routes(state))
        .layer(from_fn(request_mw))
}
