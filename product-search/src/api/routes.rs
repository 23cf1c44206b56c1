//! Route table for the product API.

use axum::{
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::error::handle_panic;
use super::handlers::*;
use super::state::AppState;

/// Build the router with all routes configured.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/products",
            get(list_products).post(create_product).put(update_product),
        )
        .route("/products/{id}", get(get_product).delete(delete_product))
        .route("/products-details", get(product_details))
        .route("/products-match/{keyword}", get(match_products))
        .route("/products-fuzzy/{keyword}", get(fuzzy_products))
        .route("/products-wildcard/{keyword}", get(wildcard_products))
        .route("/products-exists", get(existing_products))
        .route("/products-bool", get(bool_products))
        .route("/products-term/{keyword}", get(term_products))
        .route("/products-count", get(count_products))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
