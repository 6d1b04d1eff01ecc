use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::render::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Production: `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
    /// Page geometry for PDF export: US letter with 1" margins.
    pub page_config: PageConfig,
}
