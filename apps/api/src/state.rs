use std::sync::Arc;

use crate::config::Config;
use crate::insights::InsightStore;
use crate::layout::PageConfig;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend. `LlmClient` in production, a stub in tests.
    pub llm: Arc<dyn TextGenerator>,
    /// Industry insight cache: Redis when `REDIS_URL` is set, process memory otherwise.
    pub insights: Arc<dyn InsightStore>,
    pub config: Arc<Config>,
    /// Page geometry and fonts for PDF export.
    pub page_config: Arc<PageConfig>,
}
