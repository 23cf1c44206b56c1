//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the product index.

use serde_json::{json, Value};

/// Get the index settings and mappings for the product index.
///
/// - `name` is analyzed `text` with a `keyword` sub-field for exact matches
/// - `quantity` and `price` are numeric
/// - `id` is a `keyword` so it can be filtered on directly
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": {
                    "type": "keyword"
                },
                "name": {
                    "type": "text",
                    "fields": {
                        "keyword": {
                            "type": "keyword",
                            "ignore_above": 256
                        }
                    }
                },
                "quantity": {
                    "type": "integer"
                },
                "price": {
                    "type": "double"
                }
            }
        }
    })
}
