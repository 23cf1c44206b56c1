//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    http::StatusCode,
    indices::{IndicesCreateParts, IndicesExistsParts, IndicesRefreshParts},
    params::Refresh,
    CountParts, CreateParts, DeleteParts, GetParts, OpenSearch, SearchParts, UpdateParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::{RefreshPolicy, SearchIndexConfig};
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::index_config::get_index_settings;
use crate::opensearch::queries::build_search_body;
use crate::types::SearchRequest;
use product_search_shared::Product;

/// OpenSearch client implementation.
///
/// Holds a single-node connection pool; the underlying client is cheap to
/// share and safe to use from concurrent tasks.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::new("http://localhost:9200", SearchIndexConfig::default()).await?;
/// let product = Product::new("Keyboard", 5, 29.99);
/// client.create_document(&product, DEFAULT_INDEX).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    config: SearchIndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// The engine is pinged before the client is returned, so an unreachable
    /// engine fails construction.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `config` - Default index, refresh policy and fuzziness
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A connected client
    /// * `Err(SearchError::ConnectionError)` - If the URL is invalid or the ping fails
    pub async fn new(url: &str, config: SearchIndexConfig) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = Self {
            client: OpenSearch::new(transport),
            config,
        };

        if !client.health_check().await? {
            return Err(SearchError::connection(format!(
                "OpenSearch at {} did not answer ping",
                url
            )));
        }

        info!(
            url = %url,
            index = %client.config.default_index,
            refresh = %client.config.refresh,
            "Created OpenSearch client"
        );

        Ok(client)
    }

    fn refresh_param(&self) -> Refresh {
        match self.config.refresh {
            RefreshPolicy::None => Refresh::False,
            RefreshPolicy::Immediate => Refresh::True,
            RefreshPolicy::WaitFor => Refresh::WaitFor,
        }
    }

    /// Read the raw response body.
    async fn body_text(response: Response) -> Result<String, SearchError> {
        response
            .text()
            .await
            .map_err(|e| SearchError::connection(format!("Failed to read response body: {}", e)))
    }

    /// Decode a body that must be JSON.
    fn decode_json(text: &str) -> Result<Value, SearchError> {
        serde_json::from_str(text)
            .map_err(|e| SearchError::parse(format!("Response body is not JSON: {}", e)))
    }

    /// Decode an error body, keeping non-JSON bodies as a raw string.
    fn decode_error_body(text: &str) -> Value {
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }

    /// Map a `_create` response. A conflict means the id is already taken.
    fn classify_create(status: StatusCode, body: &Value) -> Result<bool, SearchError> {
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::CONFLICT {
            return Ok(false);
        }
        Err(SearchError::index(format!(
            "Create failed with status {}: {}",
            status, body
        )))
    }

    /// Map an `_update` response. Updates never upsert, so a missing
    /// document is an error rather than a `false`.
    fn classify_update(
        status: StatusCode,
        body: &Value,
        index: &str,
        document_id: &str,
    ) -> Result<bool, SearchError> {
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND
            && Self::has_error_type(body, "document_missing_exception")
        {
            return Err(SearchError::document_not_found(index, document_id));
        }
        Err(SearchError::update(format!(
            "Update failed with status {}: {}",
            status, body
        )))
    }

    /// Map a `_doc` DELETE response.
    ///
    /// A missing document answers 404 with `result: not_found`; a missing
    /// index answers 404 with an error object and stays an error.
    fn classify_delete(status: StatusCode, body: &Value) -> Result<bool, SearchError> {
        if status.is_success() {
            return Ok(true);
        }
        if status == StatusCode::NOT_FOUND && body["result"] == "not_found" {
            return Ok(false);
        }
        Err(SearchError::delete(format!(
            "Delete failed with status {}: {}",
            status, body
        )))
    }

    /// Extract the products from a `_search` response body.
    fn parse_hits(body: &Value) -> Result<Vec<Product>, SearchError> {
        let hits = body["hits"]["hits"]
            .as_array()
            .ok_or_else(|| SearchError::parse("Search response has no hits array"))?;

        hits.iter()
            .map(|hit| {
                serde_json::from_value::<Product>(hit["_source"].clone())
                    .map_err(|e| SearchError::parse(format!("Invalid product document: {}", e)))
            })
            .collect()
    }

    /// Extract the product from a `_doc` GET response body.
    ///
    /// `found: false` is a missing document, not an error.
    fn parse_get(body: &Value) -> Result<Option<Product>, SearchError> {
        match body["found"].as_bool() {
            Some(true) => serde_json::from_value::<Product>(body["_source"].clone())
                .map(Some)
                .map_err(|e| SearchError::parse(format!("Invalid product document: {}", e))),
            Some(false) => Ok(None),
            None => Err(SearchError::parse("Get response has no found flag")),
        }
    }

    /// Extract the number of documents from a `_count` response body.
    fn parse_count(body: &Value) -> Result<u64, SearchError> {
        body["count"]
            .as_u64()
            .ok_or_else(|| SearchError::parse("Count response has no count"))
    }

    /// Whether an error body reports the given engine error type.
    fn has_error_type(body: &Value, error_type: &str) -> bool {
        body["error"]["type"].as_str() == Some(error_type)
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self))]
    async fn create_index(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %index, "Index created");
            return Ok(true);
        }

        let body = Self::decode_error_body(&Self::body_text(response).await?);
        if Self::has_error_type(&body, "resource_already_exists_exception") {
            debug!(index = %index, "Index already exists");
            return Ok(false);
        }

        error!(status = %status, body = %body, "Index creation failed");
        Err(SearchError::index_creation(format!(
            "Index creation failed with status {}: {}",
            status, body
        )))
    }

    #[instrument(skip(self))]
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        match response.status_code() {
            StatusCode::OK => {
                debug!(index = %index, "Index exists");
                Ok(())
            }
            StatusCode::NOT_FOUND => {
                info!(index = %index, "Index missing, creating it");
                self.create_index(index).await.map(|_| ())
            }
            status => Err(SearchError::index_creation(format!(
                "Index existence check failed with status {}",
                status
            ))),
        }
    }

    #[instrument(skip(self, product), fields(doc_id = %product.id))]
    async fn create_document(&self, product: &Product, index: &str) -> Result<bool, SearchError> {
        let doc_id = product.document_id();

        let response = self
            .client
            .create(CreateParts::IndexId(index, &doc_id))
            .body(product)
            .refresh(self.refresh_param())
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        let status = response.status_code();
        let body = Self::decode_error_body(&Self::body_text(response).await?);

        let result = Self::classify_create(status, &body);
        match result {
            Ok(true) => debug!(doc_id = %doc_id, "Document created"),
            Ok(false) => warn!(doc_id = %doc_id, "Document already exists"),
            Err(ref e) => error!(status = %status, error = %e, "Create request failed"),
        }
        result
    }

    #[instrument(skip(self, partial))]
    async fn update_document(
        &self,
        document_id: &str,
        partial: &Value,
        index: &str,
    ) -> Result<bool, SearchError> {
        // Merge only; no doc_as_upsert, so a missing document stays missing.
        let response = self
            .client
            .update(UpdateParts::IndexId(index, document_id))
            .body(json!({ "doc": partial }))
            .refresh(self.refresh_param())
            .send()
            .await
            .map_err(|e| SearchError::update(e.to_string()))?;

        let status = response.status_code();
        let body = Self::decode_error_body(&Self::body_text(response).await?);

        let result = Self::classify_update(status, &body, index, document_id);
        match result {
            Ok(_) => debug!(doc_id = %document_id, "Document updated"),
            Err(ref e) => error!(status = %status, error = %e, "Update request failed"),
        }
        result
    }

    #[instrument(skip(self))]
    async fn delete_document(&self, document_id: &str, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, document_id))
            .refresh(self.refresh_param())
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();
        let body = Self::decode_error_body(&Self::body_text(response).await?);

        let result = Self::classify_delete(status, &body);
        match result {
            Ok(true) => debug!(doc_id = %document_id, "Document deleted"),
            Ok(false) => debug!(doc_id = %document_id, "Document to delete not found"),
            Err(ref e) => error!(status = %status, error = %e, "Delete request failed"),
        }
        result
    }

    #[instrument(skip(self))]
    async fn count_documents(&self, index: &str) -> Result<u64, SearchError> {
        let response = self
            .client
            .count(CountParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        let text = Self::body_text(response).await?;
        if !status.is_success() {
            let body = Self::decode_error_body(&text);
            error!(status = %status, body = %body, "Count request failed");
            return Err(SearchError::query(format!(
                "Count failed with status {}: {}",
                status, body
            )));
        }

        Self::parse_count(&Self::decode_json(&text)?)
    }

    #[instrument(skip(self))]
    async fn get_document(
        &self,
        document_id: &str,
        index: &str,
    ) -> Result<Option<Product>, SearchError> {
        let response = self
            .client
            .get(GetParts::IndexId(index, document_id))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        let text = Self::body_text(response).await?;
        if status.is_success() {
            return Self::parse_get(&Self::decode_json(&text)?);
        }

        let body = Self::decode_error_body(&text);
        if status == StatusCode::NOT_FOUND && body["found"] == false {
            return Ok(None);
        }

        error!(status = %status, body = %body, "Get request failed");
        Err(SearchError::query(format!(
            "Get failed with status {}: {}",
            status, body
        )))
    }

    #[instrument(skip(self, request), fields(index = %request.index, from = request.page.from, size = request.page.size))]
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Product>, SearchError> {
        let body = build_search_body(request, &self.config.fuzziness);
        debug!(query = %body, "Executing search");

        let response = self
            .client
            .search(SearchParts::Index(&[request.index.as_str()]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        let text = Self::body_text(response).await?;
        if !status.is_success() {
            let body = Self::decode_error_body(&text);
            error!(status = %status, body = %body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, body
            )));
        }

        let products = Self::parse_hits(&Self::decode_json(&text)?)?;
        debug!(hits = products.len(), "Search completed");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn refresh_index(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = Self::decode_error_body(&Self::body_text(response).await?);
            return Err(SearchError::query(format!(
                "Refresh failed with status {}: {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }
}
