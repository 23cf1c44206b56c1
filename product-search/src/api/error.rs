//! Failure envelope for HTTP responses.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use product_search_repository::SearchError;
use product_search_shared::ServiceResult;

/// An unhandled failure while serving a request.
///
/// Rendered as HTTP 500 with a `ServiceResult` error body.
#[derive(Debug)]
pub struct ApiError(SearchError);

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        error_response(ServiceResult::<()>::error(&self.0))
    }
}

/// Render a handler panic with the same envelope as other failures.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    error!(panic = %message, "Request handler panicked");
    error_response(ServiceResult::<()>::error_message(message))
}

fn error_response(body: ServiceResult<()>) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
