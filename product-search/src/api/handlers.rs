//! Request handlers. Each one extracts its parameters, makes exactly one
//! adapter call and returns the result as JSON.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use super::error::ApiError;
use super::state::AppState;
use product_search_repository::{BoolQuery, ProductField, SearchRequest};
use product_search_shared::{CreateProductRequest, Page, Product, UpdateProductRequest};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Clauses of `GET /products-bool`.
const BOOL_MATCH_KEYWORD: &str = "Mouse";
const BOOL_FUZZY_KEYWORD: &str = "erasr";
const BOOL_WILDCARD_PATTERN: &str = "*se*";

/// `GET /products`: one page of all products.
pub async fn list_products(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> ApiResult<Vec<Product>> {
    let products = state.client.get_documents(&state.index, page.clamped()).await?;
    Ok(Json(products))
}

/// `GET /products/{id}`: the product, or `null` when no document has that id.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Option<Product>> {
    let product = state.client.get_document(&id, &state.index).await?;
    Ok(Json(product))
}

/// `GET /products-details`: the first ten products via a caller-built search.
pub async fn product_details(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let request = SearchRequest::new(&*state.index).from(0).size(10);
    let products = state.client.search(&request).await?;
    Ok(Json(products))
}

pub async fn match_products(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Query(page): Query<Page>,
) -> ApiResult<Vec<Product>> {
    let products = state
        .client
        .match_query(ProductField::Name, &keyword, &state.index, page.clamped())
        .await?;
    Ok(Json(products))
}

/// `GET /products-fuzzy/{keyword}`: names within a few edits of `keyword`.
pub async fn fuzzy_products(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Query(page): Query<Page>,
) -> ApiResult<Vec<Product>> {
    let products = state
        .client
        .fuzzy_query(ProductField::Name, &keyword, &state.index, page.clamped())
        .await?;
    Ok(Json(products))
}

/// `GET /products-wildcard/{keyword}`: `keyword` is a glob pattern.
pub async fn wildcard_products(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Query(page): Query<Page>,
) -> ApiResult<Vec<Product>> {
    let products = state
        .client
        .wildcard_query(ProductField::Name, &keyword, &state.index, page.clamped())
        .await?;
    Ok(Json(products))
}

/// `GET /products-term/{keyword}`: exact, case-sensitive name match.
pub async fn term_products(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Query(page): Query<Page>,
) -> ApiResult<Vec<Product>> {
    let products = state
        .client
        .term_query(ProductField::Name, &keyword, &state.index, page.clamped())
        .await?;
    Ok(Json(products))
}

pub async fn existing_products(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> ApiResult<Vec<Product>> {
    let products = state
        .client
        .exists_query(ProductField::Name, &state.index, page.clamped())
        .await?;
    Ok(Json(products))
}

/// `GET /products-bool`: union of a match, a fuzzy and a wildcard clause.
pub async fn bool_products(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> ApiResult<Vec<Product>> {
    let query = BoolQuery::new(
        (ProductField::Name, BOOL_MATCH_KEYWORD),
        (ProductField::Name, BOOL_FUZZY_KEYWORD),
        (ProductField::Name, BOOL_WILDCARD_PATTERN),
    );
    let products = state
        .client
        .bool_query(&query, &state.index, page.clamped())
        .await?;
    Ok(Json(products))
}

/// `GET /products-count`
pub async fn count_products(State(state): State<AppState>) -> ApiResult<u64> {
    let count = state.client.count_documents(&state.index).await?;
    Ok(Json(count))
}

/// `POST /products`: index a new product under a fresh id.
///
/// Returns `false` when a document with the generated id already exists.
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<bool> {
    let product = Product::from(request);
    let created = state.client.create_document(&product, &state.index).await?;

    info!(id = %product.id, created, "Create product");
    Ok(Json(created))
}

/// `PUT /products`: merge the present fields into an existing product.
///
/// A request with no fields to change returns `false` without touching the
/// index. An unknown id is a server error.
pub async fn update_product(
    State(state): State<AppState>,
    Json(request): Json<UpdateProductRequest>,
) -> ApiResult<bool> {
    if !request.has_updates() {
        info!(id = %request.id, "Update product has no fields to change");
        return Ok(Json(false));
    }

    let updated = state
        .client
        .update_document(&request.id, &request.partial_document(), &state.index)
        .await?;

    info!(id = %request.id, updated, "Update product");
    Ok(Json(updated))
}

/// `DELETE /products/{id}`: `false` when no document has that id.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<bool> {
    let deleted = state.client.delete_document(&id, &state.index).await?;

    info!(id = %id, deleted, "Delete product");
    Ok(Json(deleted))
}
