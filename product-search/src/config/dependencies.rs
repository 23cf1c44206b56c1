//! Dependency initialization and wiring for the product API.

use std::sync::Arc;
use tracing::info;

use crate::api::AppState;
use crate::config::Config;
use crate::ServiceError;
use product_search_repository::{OpenSearchClient, SearchEngineClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared state handed to the HTTP router.
    pub state: AppState,
}

impl Dependencies {
    /// Connect to OpenSearch and build the application state.
    ///
    /// Fails when the engine cannot be reached, so the service never starts
    /// without a working search backend.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServiceError)` - If initialization fails
    pub async fn new(config: &Config) -> Result<Self, ServiceError> {
        info!(
            opensearch_url = %config.opensearch_url,
            index = %config.index,
            refresh = %config.refresh,
            "Initializing dependencies"
        );

        let search_client =
            OpenSearchClient::new(&config.opensearch_url, config.search_index_config())
                .await
                .map_err(|e| {
                    ServiceError::config(format!("Failed to connect to OpenSearch: {}", e))
                })?;

        info!("OpenSearch connection verified");

        if config.ensure_index {
            search_client.ensure_index_exists(&config.index).await?;
        }

        let client: Arc<dyn SearchEngineClient> = Arc::new(search_client);

        Ok(Self {
            state: AppState::new(client, config.index.clone()),
        })
    }
}
