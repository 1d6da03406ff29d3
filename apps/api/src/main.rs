mod config;
mod errors;
mod llm_client;
mod reply;
mod routes;
mod session;
mod setup;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::Session;
use crate::setup::store::{ConfigStore, MemoryConfigStore, RedisConfigStore};
use crate::state::AppState;

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

    info!("Starting Reply API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize config store: Redis if configured, memory otherwise
    let store: Arc<dyn ConfigStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Redis config store initialized");
            Arc::new(RedisConfigStore::new(client))
        }
        None => {
            info!("REDIS_URL not set; merchant config will not survive restarts");
            Arc::new(MemoryConfigStore::default())
        }
    };

    // A store that cannot be read only costs the prefill
    let saved = match store.load().await {
        Ok(saved) => saved,
        Err(e) => {
            warn!("Could not load saved merchant config: {e}");
            None
        }
    };
    if let Some(saved) = &saved {
        info!("Loaded saved merchant config for '{}'", saved.app_name);
    }

    // Initialize LLM client
    let llm = GeminiClient::new(config.gemini_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState::new(Arc::new(llm), store, Session::new(saved));

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
