mod config;
mod errors;
mod llm_client;
mod prompt;
mod render;
mod routes;
mod segmenter;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter_directive(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumake API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Gemini client
    let llm = GeminiClient::new(config.gemini_api_key.clone());
    info!("Gemini client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
    };

    // Build router; permissive CORS so the Vite dev server can call us
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Default filter when RUST_LOG is unset. Event targets carry the crate name
/// of the compiled binary (`api`), not the package name, so the directive
/// must use CARGO_CRATE_NAME to match anything.
fn default_filter_directive(level: &str) -> String {
    format!("{}={}", env!("CARGO_CRATE_NAME"), level)
}
