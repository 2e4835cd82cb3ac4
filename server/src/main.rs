use anyhow::Result;
use axum::{extract::DefaultBodyLimit, http::Method, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod accounts;
mod api;
mod auth;
mod config;
mod error;

use accounts::AccountStore;
use config::Config;

pub struct AppState {
    pub config: Config,
    pub accounts: AccountStore,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // API routes
        .nest("/api", api::routes())
        // Serve static files and WASM app
        .fallback_service(ServeDir::new(&state.config.server.static_dir))
        .layer(DefaultBodyLimit::max(state.config.server.max_request_size))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .init();

    info!("Starting EcoGuard server...");

    let config = Config::load()?;
    info!("Configuration loaded");

    let state = Arc::new(AppState {
        accounts: AccountStore::new(config.auth.session_duration_secs()),
        config: config.clone(),
    });

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Server listening on http://{}", addr);
    info!("Serve static files from: {}", config.server.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
