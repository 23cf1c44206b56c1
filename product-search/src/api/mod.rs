//! HTTP surface: one route per adapter operation.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{handle_panic, ApiError};
pub use routes::build_router;
pub use state::AppState;
