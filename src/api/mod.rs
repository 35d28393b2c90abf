//! HTTP API.
//!
//! One route, `GET /api/test1`, backed by the [`QueryExecutor`]. State is injected
//! through axum's `State` extractor; nothing here is global.

pub mod error;
pub mod handler;

pub use error::ApiError;

use crate::db::QueryExecutor;
use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Path of the data endpoint.
pub const DATA_ROUTE: &str = "/api/test1";

/// Shared state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub executor: QueryExecutor,
}

impl AppState {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(DATA_ROUTE, get(handler::get_data))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
