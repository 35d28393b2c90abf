//! Integration tests for the HTTP server lifecycle over real TCP.

mod common;

use common::{pool_for, seed_rows};
use data_api::{AppState, HttpServer, QueryExecutor};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

async fn raw_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_bind_addr() {
    let file = seed_rows(&[("abc", 1000)]).await;
    let pool = pool_for(&file, 2).await;
    let server = HttpServer::new(AppState::new(QueryExecutor::new(pool)), "0.0.0.0", 8001);
    assert_eq!(server.bind_addr(), "0.0.0.0:8001");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_serves_over_tcp_and_shuts_down() {
    let file = seed_rows(&[("abc", 1000), ("low", 900)]).await;
    let pool = pool_for(&file, 4).await;
    let server = HttpServer::new(
        AppState::new(QueryExecutor::new(pool.clone())),
        "127.0.0.1",
        0,
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        server
            .serve(listener, async move {
                let _ = shutdown_rx.await;
            })
            .await
    });

    let response = raw_get(addr, "/api/test1").await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("application/json"));
    assert!(response.ends_with(r#"[{"field1":"abc","field2":1000}]"#));

    shutdown_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .expect("server should stop after shutdown")
        .unwrap();
    assert!(result.is_ok());

    // The server closes the pool on the way out
    assert!(pool.acquire().await.is_err());
    let stats = pool.stats();
    assert_eq!(stats.acquired, 1);
    assert_eq!(stats.released, 1);
}
