//! # Product Search Shared
//!
//! Shared types used by both the search repository and the HTTP API:
//! the `Product` document, request payloads, pagination and the
//! `ServiceResult` envelope returned on failures.

mod page;
mod product;
mod service_result;

pub use page::{Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use product::{CreateProductRequest, Product, UpdateProductRequest};
pub use service_result::{ProcessState, ServiceResult};
