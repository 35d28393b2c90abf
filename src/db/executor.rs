//! Query execution engine.
//!
//! The executor runs one read query per call on a connection borrowed from the
//! [`ConnectionPool`]. The connection is released before the result is returned,
//! on the success and the error branch alike.
//!
//! # Architecture
//!
//! Database-specific fetching lives in the `postgres` and `sqlite` submodules,
//! which have identical shapes adapted to their row types.

use crate::db::mapper::map_rows;
use crate::db::pool::{Connection, ConnectionPool};
use crate::error::DbResult;
use crate::models::DataRecord;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use std::time::Instant;
use tracing::debug;

/// The one query this service runs. The threshold is part of the statement; if it
/// ever becomes an input it must be bound as a parameter.
pub const SELECT_DATA_SQL: &str = "SELECT field1, field2 FROM data WHERE field2 > 995";

/// Raw rows in the order the database returned them.
pub enum QueryResult {
    Postgres(Vec<PgRow>),
    SQLite(Vec<SqliteRow>),
}

impl std::fmt::Debug for QueryResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match self {
            QueryResult::Postgres(_) => "Postgres",
            QueryResult::SQLite(_) => "SQLite",
        };
        f.debug_struct("QueryResult")
            .field("backend", &backend)
            .field("rows", &self.len())
            .finish()
    }
}

impl QueryResult {
    pub fn len(&self) -> usize {
        match self {
            QueryResult::Postgres(rows) => rows.len(),
            QueryResult::SQLite(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Query executor that handles database query execution.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    pool: ConnectionPool,
}

impl QueryExecutor {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read query on one pooled connection and return its rows.
    pub async fn run_query(&self, sql: &str) -> DbResult<QueryResult> {
        let start = Instant::now();
        let mut conn = self.pool.acquire().await?;

        let result = match conn.connection_mut() {
            Connection::Postgres(c) => postgres::fetch_rows(c, sql)
                .await
                .map(QueryResult::Postgres),
            Connection::SQLite(c) => sqlite::fetch_rows(c, sql).await.map(QueryResult::SQLite),
        };
        conn.release();

        debug!(
            sql = %sql,
            ok = result.is_ok(),
            rows = result.as_ref().map(QueryResult::len).unwrap_or(0),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Executed query"
        );

        result
    }

    /// Run [`SELECT_DATA_SQL`] and map every row to a [`DataRecord`].
    pub async fn fetch_records(&self) -> DbResult<Vec<DataRecord>> {
        let rows = self.run_query(SELECT_DATA_SQL).await?;
        map_rows(&rows)
    }
}

mod postgres {
    use crate::error::DbResult;
    use sqlx::Postgres;
    use sqlx::pool::PoolConnection;
    use sqlx::postgres::PgRow;

    pub async fn fetch_rows(
        conn: &mut PoolConnection<Postgres>,
        sql: &str,
    ) -> DbResult<Vec<PgRow>> {
        Ok(sqlx::query(sql).fetch_all(&mut **conn).await?)
    }
}

mod sqlite {
    use crate::error::DbResult;
    use sqlx::Sqlite;
    use sqlx::pool::PoolConnection;
    use sqlx::sqlite::SqliteRow;

    pub async fn fetch_rows(
        conn: &mut PoolConnection<Sqlite>,
        sql: &str,
    ) -> DbResult<Vec<SqliteRow>> {
        Ok(sqlx::query(sql).fetch_all(&mut **conn).await?)
    }
}
