//! Request-scoped errors and their HTTP rendering.
//!
//! Every failure below the handler ends up here and becomes a 500 with the fixed
//! body `Database error`. The detail goes to the log only.

use crate::error::DbError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;

/// Body of every failed response.
pub const DATABASE_ERROR_BODY: &str = "Database error";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Query, pool or row mapping failure (500, logged)
    #[error("Database error: {source}")]
    Database {
        #[source]
        source: DbError,
        /// Time spent in the handler before the failure
        elapsed: Duration,
    },
}

impl ApiError {
    pub fn database(source: DbError, elapsed: Duration) -> Self {
        Self::Database { source, elapsed }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Database { source, elapsed } => {
                tracing::error!(
                    error = %source,
                    sql_state = ?source.sql_state(),
                    suggestion = ?source.suggestion(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Database error"
                );
            }
        }

        (status, DATABASE_ERROR_BODY).into_response()
    }
}
