//! Shared fixtures: file-backed SQLite databases seeded with a `data` table.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use data_api::config::PoolOptions;
use data_api::{AppState, ConnectionPool, QueryExecutor, create_router};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection};
use tempfile::NamedTempFile;
use tower::ServiceExt;

pub const CREATE_DATA_TABLE: &str =
    "CREATE TABLE data (field1 TEXT NOT NULL, field2 INTEGER NOT NULL)";

/// Create a database file and run the given statements against it.
pub async fn seed_statements(statements: &[&str]) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    let mut conn = SqliteConnectOptions::new()
        .filename(file.path())
        .journal_mode(SqliteJournalMode::Delete)
        .connect()
        .await
        .unwrap();

    for sql in statements {
        sqlx::query(sql).execute(&mut conn).await.unwrap();
    }
    conn.close().await.unwrap();
    file
}

/// Create a database file holding a `data` table with the given rows, in order.
pub async fn seed_rows<S: AsRef<str>>(rows: &[(S, i32)]) -> NamedTempFile {
    let file = seed_statements(&[CREATE_DATA_TABLE]).await;
    let mut conn = SqliteConnectOptions::new()
        .filename(file.path())
        .journal_mode(SqliteJournalMode::Delete)
        .connect()
        .await
        .unwrap();

    for (field1, field2) in rows {
        sqlx::query("INSERT INTO data (field1, field2) VALUES (?, ?)")
            .bind(field1.as_ref())
            .bind(*field2)
            .execute(&mut conn)
            .await
            .unwrap();
    }
    conn.close().await.unwrap();
    file
}

pub async fn pool_for(file: &NamedTempFile, max_connections: u32) -> ConnectionPool {
    let url = format!("sqlite:{}", file.path().display());
    let options = PoolOptions {
        max_connections: Some(max_connections),
        acquire_timeout_secs: Some(10),
        ..Default::default()
    };
    ConnectionPool::connect(&url, &options).await.unwrap()
}

pub fn router_for(pool: &ConnectionPool) -> Router {
    create_router(AppState::new(QueryExecutor::new(pool.clone())))
}

/// Send `GET uri` through the router and collect status and body.
pub async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}
