//! Data API Library
//!
//! Serves the rows of the `data` table whose `field2` exceeds 995 as JSON over
//! HTTP, querying PostgreSQL through a bounded connection pool.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod server;

pub use api::{AppState, create_router};
pub use config::Config;
pub use db::{ConnectionPool, QueryExecutor};
pub use error::DbError;
pub use server::HttpServer;
