mod config;
mod drafting;
mod errors;
mod export;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::drafting::ClauseRuleTable;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
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

    info!("Starting NDA Drafter API v{}", env!("CARGO_PKG_VERSION"));

    // Clause rules: a malformed table means no prompt can be compiled, so fail fast
    let rules = ClauseRuleTable::load(config.rules_path.as_deref())
        .context("Failed to load NDA clause rule table")?;
    info!(
        "Clause rule table ready: {} topics ({})",
        rules.len(),
        config
            .rules_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone())
        .context("Failed to build HTTP client for the LLM")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        rules: Arc::new(rules),
        drafter: Arc::new(llm),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the form UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
