mod config;
mod enhance;
mod errors;
mod export;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::enhance::{DisabledEnhancer, LlmEnhancer, TextEnhancer};
use crate::export::load_font;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cvforge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize text enhancer (LLM-backed when an API key is configured)
    let enhancer: Arc<dyn TextEnhancer> = match &config.anthropic_api_key {
        Some(key) => {
            info!("LLM text enhancer enabled (model: {})", llm_client::MODEL);
            Arc::new(LlmEnhancer::new(LlmClient::new(key.clone())))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; text enhancement is disabled");
            Arc::new(DisabledEnhancer)
        }
    };

    // Load the export font. Missing fonts only disable PDF export.
    let font = match load_font(&config.resume_font_path) {
        Ok(font) => {
            info!("Export font loaded from {}", config.resume_font_path);
            Some(Arc::new(font))
        }
        Err(e) => {
            warn!("Export font unavailable, PDF export will fail: {e:#}");
            None
        }
    };

    // Build app state
    let state = AppState::new(config.clone(), enhancer, font);

    // Build router
    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
