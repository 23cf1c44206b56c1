//! In-memory search engine used by the API tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use product_search::{build_router, AppState};
use product_search_repository::{SearchEngineClient, SearchError, SearchRequest};
use product_search_shared::Product;

pub const TEST_INDEX: &str = "products";

/// Stores products in a map and records every search it receives.
///
/// Searches return the stored products sorted by name inside the requested
/// page; query evaluation is left to the real engine.
#[derive(Default)]
pub struct MemorySearchEngine {
    products: Mutex<HashMap<String, Product>>,
    searches: Mutex<Vec<SearchRequest>>,
    failing: AtomicBool,
}

impl MemorySearchEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail with a connection error.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn insert(&self, product: Product) {
        self.products
            .lock()
            .unwrap()
            .insert(product.document_id(), product);
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().values().cloned().collect()
    }

    pub fn last_search(&self) -> Option<SearchRequest> {
        self.searches.lock().unwrap().last().cloned()
    }

    pub fn search_count(&self) -> usize {
        self.searches.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), SearchError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SearchError::connection("engine unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl SearchEngineClient for MemorySearchEngine {
    async fn create_index(&self, _index: &str) -> Result<bool, SearchError> {
        self.check()?;
        Ok(true)
    }

    async fn ensure_index_exists(&self, _index: &str) -> Result<(), SearchError> {
        self.check()
    }

    async fn create_document(&self, product: &Product, _index: &str) -> Result<bool, SearchError> {
        self.check()?;
        let mut products = self.products.lock().unwrap();
        let id = product.document_id();
        if products.contains_key(&id) {
            return Ok(false);
        }
        products.insert(id, product.clone());
        Ok(true)
    }

    async fn update_document(
        &self,
        document_id: &str,
        partial: &Value,
        index: &str,
    ) -> Result<bool, SearchError> {
        self.check()?;
        let mut products = self.products.lock().unwrap();
        let product = products
            .get_mut(document_id)
            .ok_or_else(|| SearchError::document_not_found(index, document_id))?;

        if let Some(name) = partial.get("name").and_then(Value::as_str) {
            product.name = name.to_string();
        }
        if let Some(quantity) = partial.get("quantity").and_then(Value::as_u64) {
            product.quantity = quantity as u32;
        }
        if let Some(price) = partial.get("price").and_then(Value::as_f64) {
            product.price = price;
        }
        Ok(true)
    }

    async fn delete_document(&self, document_id: &str, _index: &str) -> Result<bool, SearchError> {
        self.check()?;
        Ok(self.products.lock().unwrap().remove(document_id).is_some())
    }

    async fn count_documents(&self, _index: &str) -> Result<u64, SearchError> {
        self.check()?;
        Ok(self.products.lock().unwrap().len() as u64)
    }

    async fn get_document(
        &self,
        document_id: &str,
        _index: &str,
    ) -> Result<Option<Product>, SearchError> {
        self.check()?;
        Ok(self.products.lock().unwrap().get(document_id).cloned())
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<Product>, SearchError> {
        self.check()?;
        self.searches.lock().unwrap().push(request.clone());

        let mut products = self.products();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products
            .into_iter()
            .skip(request.page.from)
            .take(request.page.size)
            .collect())
    }

    async fn refresh_index(&self, _index: &str) -> Result<(), SearchError> {
        self.check()
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        Ok(!self.failing.load(Ordering::SeqCst))
    }
}

pub fn router(engine: Arc<MemorySearchEngine>) -> Router {
    build_router(AppState::new(engine, TEST_INDEX))
}

/// Send one request through the router and decode the JSON body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, json)
}
