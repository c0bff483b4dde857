use std::sync::Arc;

use rusttype::Font;

use crate::config::Config;
use crate::enhance::TextEnhancer;
use crate::models::template::TemplateCatalog;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Built-in templates, loaded once at startup and never mutated.
    pub templates: Arc<TemplateCatalog>,
    /// Pluggable text enhancer. `LlmEnhancer` when an API key is configured,
    /// otherwise `DisabledEnhancer`.
    pub enhancer: Arc<dyn TextEnhancer>,
    /// Export font. `None` when it failed to load; exports then fail with a
    /// retryable error.
    pub font: Option<Arc<Font<'static>>>,
}

impl AppState {
    pub fn new(
        config: Config,
        enhancer: Arc<dyn TextEnhancer>,
        font: Option<Arc<Font<'static>>>,
    ) -> Self {
        Self {
            sessions: SessionStore::new(config.max_sessions),
            templates: Arc::new(TemplateCatalog::builtin()),
            enhancer,
            font,
            config,
        }
    }
}
