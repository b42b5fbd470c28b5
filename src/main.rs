use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod services;

use config::Config;
use db::{PostgrestStore, RecordStore};
use services::gateway::UpsertGateway;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub gateway: UpsertGateway,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Self {
        Self {
            gateway: UpsertGateway::new(store.clone()),
            store,
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Entry form
        .route("/api/form", get(handlers::entries::form_fields))
        .route("/api/entries", post(handlers::entries::save_entry))
        // History
        .route("/api/daily-logs", get(handlers::daily_logs::list_daily_logs))
        .route("/api/biometrics", get(handlers::biometrics::list_biometrics))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "healthlog_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Without store credentials nothing can be saved or read
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Connection error: store configuration missing or invalid");
            std::process::exit(1);
        }
    };

    let store: Arc<dyn RecordStore> = Arc::new(PostgrestStore::from_config(&config)?);
    tracing::info!(store_url = %config.store_url, "Record store client initialized");

    let origin = config.frontend_url.parse::<axum::http::HeaderValue>()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    let addr = config.listen_addr();
    let state = AppState::new(store, config);

    let app = router(state).layer(cors).layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
