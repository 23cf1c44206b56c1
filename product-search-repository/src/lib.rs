//! # Product Search Repository
//!
//! This crate provides the search adapter used by the product API: the
//! `SearchEngineClient` trait, query descriptors, error types and a
//! concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::{RefreshPolicy, SearchIndexConfig, DEFAULT_INDEX};
pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use self::opensearch::OpenSearchClient;
pub use types::{BoolQuery, ProductField, ProductQuery, SearchRequest};
