mod config;
mod db;
mod errors;
mod extract;
mod generation;
mod history;
mod llm_client;
mod models;
mod routes;
mod settings;
mod state;

use anyhow::Result;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::generation::controller::LetterController;
use crate::llm_client::ResponsesClient;
use crate::routes::build_router;
use crate::settings::{SettingsStore, SqliteSettingsStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cover letter backend v{}", env!("CARGO_PKG_VERSION"));

    // Local SQLite holds both the history records and the settings
    let db = create_pool(&config.database_url).await?;
    let settings: Arc<dyn SettingsStore> = Arc::new(SqliteSettingsStore::new(db.clone()));

    let llm = ResponsesClient::new(config.responses_url.clone());
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        llm.endpoint()
    );

    let controller = Arc::new(LetterController::new(db, llm, Arc::clone(&settings)));

    let state = AppState {
        controller,
        settings,
    };

    // Loopback only: this backend serves the local front end, never the network.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, config.port));
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
