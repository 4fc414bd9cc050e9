mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod state;
mod writing;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, INTERVIEW_MODELS, WRITING_MODEL};
use crate::routes::build_router;
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

    info!("Starting Coach API v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; every generation request will fail until it is");
    }

    let llm = GeminiClient::new(
        config.gemini_api_key.clone(),
        &config.gemini_api_base,
        config.model_timeout,
    )?;
    info!(
        "LLM client initialized (interview models: {}, writing model: {}, timeout: {:?})",
        INTERVIEW_MODELS.join(" → "),
        WRITING_MODEL,
        config.model_timeout
    );

    let state = AppState {
        llm: Arc::new(llm),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
