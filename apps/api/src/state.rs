use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup and read-only afterwards. Default: `LlmClient`.
    pub gateway: Arc<dyn CompletionGateway>,
    pub config: Config,
}
