//! Unified error type for the products service.
//!
//! Every failure is reported to HTTP callers the same way: status 500 with the
//! error message in a JSON body. The variants only exist so logs and tests can
//! tell failures apart.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors produced by configuration, the data store, or product operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Any failure reported by the data store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Product price was zero, negative, or not finite
    #[error("Invalid product price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: f64,
    },

    /// Product name was empty after trimming
    #[error("Product name cannot be empty")]
    InvalidName,

    /// A restaurant referenced by an operation does not exist
    #[error("Restaurant not found: {id}")]
    RestaurantNotFound {
        /// The missing restaurant id
        id: i64,
    },

    /// I/O failure (config file, listener socket)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request path or body could not be extracted
    #[error("Invalid request: {message}")]
    Rejection {
        /// Text of the framework rejection
        message: String,
    },
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejection {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejection {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {}", self);
        let body = serde_json::json!({ "error": self.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
