//! # Product Search
//!
//! HTTP API exposing CRUD and search operations over the product index.
//!
//! This crate provides the configuration, dependency wiring and axum
//! routes; all engine access goes through `product_search_repository`.

pub mod api;
pub mod config;

pub use api::{build_router, AppState};
pub use config::{Config, Dependencies};

use thiserror::Error;

/// Errors that can occur while starting or running the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] product_search_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ServiceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
