use crate::config::Config;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    #[allow(dead_code)]
    pub config: Config,
}
