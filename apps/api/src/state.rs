use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing in here is mutated by requests.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend. `GeminiClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
}
