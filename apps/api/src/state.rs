use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; nothing in it is mutated while serving.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend. Production: `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(llm: Arc<dyn TextGenerator>, config: Config) -> Self {
        Self {
            llm,
            config: Arc::new(config),
        }
    }
}
