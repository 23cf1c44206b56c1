//! Product document and the request payloads that create or modify it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// A product as stored in the search index.
///
/// One product corresponds to exactly one document, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The product's unique identifier, also used as the document id.
    pub id: Uuid,
    /// Display name. Analyzed for full-text search.
    pub name: String,
    /// Units in stock.
    pub quantity: u32,
    /// Unit price.
    pub price: f64,
}

impl Product {
    /// Create a product with a freshly generated identifier.
    pub fn new(name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity,
            price,
        }
    }

    /// The document id under which this product is indexed.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}

/// Body of `POST /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl From<CreateProductRequest> for Product {
    fn from(req: CreateProductRequest) -> Self {
        Product::new(req.name, req.quantity, req.price)
    }
}

/// Body of `PUT /products`.
///
/// `id` selects the document. Only fields that are `Some` are written;
/// everything else is left unchanged in the index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl UpdateProductRequest {
    /// Create an update request for the given document id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the name to update.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the quantity to update.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the price to update.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Check if any fields are set for update.
    pub fn has_updates(&self) -> bool {
        self.name.is_some() || self.quantity.is_some() || self.price.is_some()
    }

    /// The partial document merged into the stored one.
    pub fn partial_document(&self) -> Value {
        let mut doc = Map::new();
        if let Some(ref name) = self.name {
            doc.insert("name".to_string(), json!(name));
        }
        if let Some(quantity) = self.quantity {
            doc.insert("quantity".to_string(), json!(quantity));
        }
        if let Some(price) = self.price {
            doc.insert("price".to_string(), json!(price));
        }
        Value::Object(doc)
    }
}
