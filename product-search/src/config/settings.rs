//! Environment-driven configuration.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use product_search_repository::{RefreshPolicy, SearchIndexConfig, DEFAULT_INDEX};

use crate::ServiceError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default HTTP bind address.
const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Runtime configuration of the service.
#[derive(Debug, Clone)]
pub struct Config {
    pub opensearch_url: String,
    pub index: String,
    pub server_addr: SocketAddr,
    pub refresh: RefreshPolicy,
    pub ensure_index: bool,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `PRODUCTS_INDEX`: Index name (default: products)
    /// - `SERVER_ADDR`: HTTP bind address (default: 0.0.0.0:8080)
    /// - `SEARCH_REFRESH`: Write refresh policy, `false`, `true` or `wait_for` (default: false)
    /// - `ENSURE_INDEX`: Create the index at startup when missing (default: true)
    /// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let opensearch_url =
            lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());

        let index = lookup("PRODUCTS_INDEX").unwrap_or_else(|| DEFAULT_INDEX.to_string());
        if index.trim().is_empty() {
            return Err(ServiceError::config("PRODUCTS_INDEX must not be empty"));
        }

        let server_addr = lookup("SERVER_ADDR")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ServiceError::config(format!("Invalid SERVER_ADDR: {}", e)))?;

        let refresh = match lookup("SEARCH_REFRESH") {
            Some(value) => value
                .parse::<RefreshPolicy>()
                .map_err(|e| ServiceError::config(format!("Invalid SEARCH_REFRESH: {}", e)))?,
            None => RefreshPolicy::default(),
        };

        let ensure_index = match lookup("ENSURE_INDEX") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ServiceError::config(format!("Invalid ENSURE_INDEX: {}", value)))?,
            None => true,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value
                .parse::<LogFormat>()
                .map_err(|e| ServiceError::config(format!("Invalid LOG_FORMAT: {}", e)))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            opensearch_url,
            index,
            server_addr,
            refresh,
            ensure_index,
            log_format,
        })
    }

    /// Settings handed to the search adapter.
    pub fn search_index_config(&self) -> SearchIndexConfig {
        SearchIndexConfig::with_index(self.index.clone()).refresh(self.refresh)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
