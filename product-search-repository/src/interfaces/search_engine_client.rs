//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, mock, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use crate::types::{BoolQuery, ProductField, ProductQuery, SearchRequest};
use product_search_shared::{Page, Product};

/// Abstract interface for product index operations.
///
/// Every method is a single round-trip to the engine. Engine failures are
/// returned as `SearchError` and never retried.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so one instance can be shared by
/// every request handler.
///
/// # Cancellation
///
/// Dropping a returned future abandons the in-flight engine request.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Create `index` with the product mappings.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The index was created
    /// * `Ok(false)` - The index already exists
    /// * `Err(SearchError)` - If creation fails for any other reason
    async fn create_index(&self, index: &str) -> Result<bool, SearchError>;

    /// Create `index` if it does not exist yet.
    ///
    /// This should be called during application startup.
    async fn ensure_index_exists(&self, index: &str) -> Result<(), SearchError>;

    /// Store a new document keyed by the product's id.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The document was created
    /// * `Ok(false)` - A document with the same id already exists
    /// * `Err(SearchError)` - If indexing fails
    async fn create_document(&self, product: &Product, index: &str) -> Result<bool, SearchError>;

    /// Merge `partial` into an existing document.
    ///
    /// Fields absent from `partial` are left unchanged. The document must
    /// already exist; otherwise `SearchError::DocumentNotFound` is returned.
    async fn update_document(
        &self,
        document_id: &str,
        partial: &Value,
        index: &str,
    ) -> Result<bool, SearchError>;

    /// Delete a document.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The document was deleted
    /// * `Ok(false)` - No document with that id exists
    /// * `Err(SearchError)` - If the deletion fails
    async fn delete_document(&self, document_id: &str, index: &str) -> Result<bool, SearchError>;

    /// Count every document in `index`.
    async fn count_documents(&self, index: &str) -> Result<u64, SearchError>;

    /// Fetch one document by id. A missing document is `Ok(None)`.
    async fn get_document(
        &self,
        document_id: &str,
        index: &str,
    ) -> Result<Option<Product>, SearchError>;

    /// Run a caller-built search and return the matching products in engine order.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Product>, SearchError>;

    /// Make recent writes to `index` visible to search.
    async fn refresh_index(&self, index: &str) -> Result<(), SearchError>;

    /// Check if the search engine is reachable.
    async fn health_check(&self) -> Result<bool, SearchError>;

    /// List the documents of `index` within `page`.
    async fn get_documents(&self, index: &str, page: Page) -> Result<Vec<Product>, SearchError> {
        self.search(&SearchRequest::new(index).page(page)).await
    }

    /// Analyzed full-text match on `field`.
    async fn match_query(
        &self,
        field: ProductField,
        keyword: &str,
        index: &str,
        page: Page,
    ) -> Result<Vec<Product>, SearchError> {
        let request = SearchRequest::new(index)
            .query(ProductQuery::match_query(field, keyword))
            .page(page);
        self.search(&request).await
    }

    /// Edit-distance tolerant match on `field`.
    async fn fuzzy_query(
        &self,
        field: ProductField,
        keyword: &str,
        index: &str,
        page: Page,
    ) -> Result<Vec<Product>, SearchError> {
        let request = SearchRequest::new(index)
            .query(ProductQuery::fuzzy(field, keyword))
            .page(page);
        self.search(&request).await
    }

    /// Glob match (`*`, `?`) on `field`.
    async fn wildcard_query(
        &self,
        field: ProductField,
        pattern: &str,
        index: &str,
        page: Page,
    ) -> Result<Vec<Product>, SearchError> {
        let request = SearchRequest::new(index)
            .query(ProductQuery::wildcard(field, pattern))
            .page(page);
        self.search(&request).await
    }

    /// Exact-value match on `field`.
    async fn term_query(
        &self,
        field: ProductField,
        value: &str,
        index: &str,
        page: Page,
    ) -> Result<Vec<Product>, SearchError> {
        let request = SearchRequest::new(index)
            .query(ProductQuery::term(field, value))
            .page(page);
        self.search(&request).await
    }

    /// Documents where `field` is present and non-null.
    async fn exists_query(
        &self,
        field: ProductField,
        index: &str,
        page: Page,
    ) -> Result<Vec<Product>, SearchError> {
        let request = SearchRequest::new(index)
            .query(ProductQuery::exists(field))
            .page(page);
        self.search(&request).await
    }

    /// Documents matching any of the match, fuzzy or wildcard clauses.
    async fn bool_query(
        &self,
        query: &BoolQuery,
        index: &str,
        page: Page,
    ) -> Result<Vec<Product>, SearchError> {
        let request = SearchRequest::new(index)
            .query(ProductQuery::from(query))
            .page(page);
        self.search(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every search request and answers with a fixed product list.
    struct RecordingClient {
        requests: Mutex<Vec<SearchRequest>>,
        products: Vec<Product>,
    }

    impl RecordingClient {
        fn new(products: Vec<Product>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                products,
            }
        }

        fn last_request(&self) -> SearchRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl SearchEngineClient for RecordingClient {
        async fn create_index(&self, _index: &str) -> Result<bool, SearchError> {
            Ok(true)
        }

        async fn ensure_index_exists(&self, _index: &str) -> Result<(), SearchError> {
            Ok(())
        }

        async fn create_document(&self, _product: &Product, _index: &str) -> Result<bool, SearchError> {
            Ok(true)
        }

        async fn update_document(
            &self,
            _document_id: &str,
            _partial: &Value,
            _index: &str,
        ) -> Result<bool, SearchError> {
            Ok(true)
        }

        async fn delete_document(&self, _document_id: &str, _index: &str) -> Result<bool, SearchError> {
            Ok(true)
        }

        async fn count_documents(&self, _index: &str) -> Result<u64, SearchError> {
            Ok(self.products.len() as u64)
        }

        async fn get_document(
            &self,
            _document_id: &str,
            _index: &str,
        ) -> Result<Option<Product>, SearchError> {
            Ok(None)
        }

        async fn search(&self, request: &SearchRequest) -> Result<Vec<Product>, SearchError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.products.clone())
        }

        async fn refresh_index(&self, _index: &str) -> Result<(), SearchError> {
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_query_helpers_delegate_to_search() {
        let mouse = Product::new("Mouse", 1, 10.0);
        let client = RecordingClient::new(vec![mouse.clone()]);
        let page = Page::new(5, 20);

        let results = client
            .fuzzy_query(ProductField::Name, "Mors", "products", page)
            .await
            .unwrap();

        assert_eq!(results, vec![mouse]);
        let request = client.last_request();
        assert_eq!(request.index, "products");
        assert_eq!(request.page, page);
        assert_eq!(request.query, ProductQuery::fuzzy(ProductField::Name, "Mors"));
    }

    #[tokio::test]
    async fn test_get_documents_uses_match_all() {
        let client = RecordingClient::new(vec![]);

        client.get_documents("products", Page::default()).await.unwrap();

        let request = client.last_request();
        assert_eq!(request.query, ProductQuery::MatchAll);
        assert_eq!(request.page, Page::default());
    }

    #[tokio::test]
    async fn test_bool_query_is_single_search() {
        let client = RecordingClient::new(vec![]);
        let query = BoolQuery::new(
            (ProductField::Name, "Mouse"),
            (ProductField::Name, "erasr"),
            (ProductField::Name, "*se*"),
        );

        client.bool_query(&query, "products", Page::default()).await.unwrap();

        assert_eq!(client.requests.lock().unwrap().len(), 1);
        assert!(matches!(client.last_request().query, ProductQuery::Bool { .. }));
    }

    #[tokio::test]
    async fn test_other_query_helpers_pick_matching_variant() {
        let client = RecordingClient::new(vec![]);
        let page = Page::default();

        client.match_query(ProductField::Name, "Mouse", "products", page).await.unwrap();
        assert_eq!(client.last_request().query, ProductQuery::match_query(ProductField::Name, "Mouse"));

        client.wildcard_query(ProductField::Name, "*ous*", "products", page).await.unwrap();
        assert_eq!(client.last_request().query, ProductQuery::wildcard(ProductField::Name, "*ous*"));

        client.term_query(ProductField::Name, "Mouse", "products", page).await.unwrap();
        assert_eq!(client.last_request().query, ProductQuery::term(ProductField::Name, "Mouse"));

        client.exists_query(ProductField::Name, "products", page).await.unwrap();
        assert_eq!(client.last_request().query, ProductQuery::exists(ProductField::Name));
    }
}
