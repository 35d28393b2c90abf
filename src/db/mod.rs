//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Connection pool with guarded, counted connection loans
//! - Query execution for the fixed `data` query
//! - Row to record mapping

pub mod executor;
pub mod mapper;
pub mod pool;

pub use executor::{QueryExecutor, QueryResult, SELECT_DATA_SQL};
pub use mapper::{map_row, map_rows};
pub use pool::{Connection, ConnectionPool, DbPool, PoolStats, PooledConnection};
