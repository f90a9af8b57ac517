use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::ChatCompleter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Production: `LlmClient`. Tests swap in a scripted completer.
    pub llm: Arc<dyn ChatCompleter>,
    pub config: Config,
}
