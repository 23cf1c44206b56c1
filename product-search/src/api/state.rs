//! Shared handler state.

use std::sync::Arc;

use product_search_repository::SearchEngineClient;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn SearchEngineClient>,
    pub index: Arc<str>,
}

impl AppState {
    /// Serve `index` through `client`.
    pub fn new(client: Arc<dyn SearchEngineClient>, index: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            index: index.into(),
        }
    }
}
