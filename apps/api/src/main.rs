mod config;
mod db;
mod errors;
mod extract;
mod models;
mod notify;
mod oracle;
mod routes;
mod screening;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::notify::HttpMailer;
use crate::oracle::OpenAiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgCandidateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screening API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL-backed candidate store
    let pool = create_pool(&config.database_url).await?;
    let store = Arc::new(PgCandidateStore::new(pool));

    // Initialize completion oracle
    let oracle = Arc::new(OpenAiClient::new(config.openai_api_key.clone()));
    info!("Completion oracle initialized (model: {})", crate::oracle::MODEL);

    // Initialize mail dispatcher
    let notifier = Arc::new(HttpMailer::new(
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_from.clone(),
    ));
    info!("Mail dispatcher initialized");

    // Build app state
    let state = AppState {
        store,
        oracle,
        notifier,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
