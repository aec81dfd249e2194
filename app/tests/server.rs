//! Wire-level tests over a real socket
//!
//! These bind an ephemeral port, hand the listener to the server and speak
//! raw HTTP/1.1, so they catch anything that only shows up after hyper
//! serialization.

use std::net::SocketAddr;

use breeze::middleware::{Cors, JsonBody};
use breeze::{AppContext, Config, DatabaseConfig, Server, ServerConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use app::middleware::RequestLog;
use app::routes;

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            max_body_size: 1024 * 1024,
            public_dir: "public".into(),
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 1,
            min_connections: 1,
            connect_timeout: 5,
            logging: false,
        },
    }
}

/// Bind port 0, spawn the app's stack on the listener, return the address
async fn spawn_app(max_body_size: usize) -> SocketAddr {
    let ctx = AppContext::new(test_config());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = Server::new(routes::register(&ctx))
        .middleware(RequestLog)
        .middleware(Cors::permissive())
        .middleware(JsonBody)
        .max_body_size(max_body_size);
    tokio::spawn(async move {
        server.serve(listener).await.unwrap();
    });

    addr
}

/// Write one raw request, read until the server closes the connection
async fn roundtrip(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

#[tokio::test]
async fn pet_detail_over_the_wire() {
    let addr = spawn_app(1024 * 1024).await;

    let response = roundtrip(
        addr,
        "GET /api/pets/42 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200"), "got {response:?}");
    assert!(response.contains("access-control-allow-origin: *"));
    assert!(response.contains("\"path\":\"/42\""));
}

#[tokio::test]
async fn unknown_paths_get_a_cors_tagged_404_over_the_wire() {
    let addr = spawn_app(1024 * 1024).await;

    let response = roundtrip(
        addr,
        "GET /definitely/not/here HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 404"), "got {response:?}");
    assert!(response.contains("access-control-allow-origin: *"));
}

#[tokio::test]
async fn oversized_bodies_are_refused_with_413() {
    let addr = spawn_app(1024).await;

    let body = "x".repeat(2048);
    let request = format!(
        "POST /api/chat/messages HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    let response = roundtrip(addr, &request).await;

    assert!(response.starts_with("HTTP/1.1 413"), "got {response:?}");
}

#[tokio::test]
async fn a_burst_of_sequential_connections_is_served() {
    let addr = spawn_app(1024 * 1024).await;

    for id in 0..32 {
        let request =
            format!("GET /api/pets/{id} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        let response = roundtrip(addr, &request).await;
        assert!(
            response.starts_with("HTTP/1.1 200"),
            "request {id} got {response:?}"
        );
    }
}

#[tokio::test]
async fn preflight_over_the_wire() {
    let addr = spawn_app(1024 * 1024).await;

    let response = roundtrip(
        addr,
        "OPTIONS /api/pets HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
         Origin: http://example.com\r\nAccess-Control-Request-Method: POST\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 204"), "got {response:?}");
    assert!(response.contains("access-control-allow-methods: GET,HEAD,PUT,PATCH,POST,DELETE"));
}
