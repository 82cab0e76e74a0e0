//! HTTP layer - axum routes over the core product operations.
//!
//! Handlers only extract path and body parameters, call into `core`, and
//! serialize the result. Any error becomes a 500 response (see `errors`).

/// Extractors reporting rejections as [`crate::errors::Error`]
pub mod extract;
/// Product route handlers
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;

/// Shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for all database operations
    pub database: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/restaurants/:restaurant_id/products",
            get(products::index_restaurant),
        )
        .route("/products", post(products::create))
        .route("/products/popular", get(products::popular))
        .route(
            "/products/:product_id",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
