//! Testing utilities
//!
//! Provides an in-process [`TestClient`] that runs requests through the same
//! middleware chain and route dispatch as the running server, without
//! opening a socket. Request builders keep test bodies short.
//!
//! # Example
//!
//! ```rust,ignore
//! use breeze::middleware::Cors;
//! use breeze::testing::TestClient;
//!
//! let client = TestClient::new(routes::register(&ctx)).middleware(Cors::permissive());
//! let response = client.get("/api/pets/42").await;
//! assert_eq!(response.status_code(), 200);
//! ```

use crate::http::{HttpResponse, Request};
use crate::middleware::{Middleware, MiddlewareRegistry};
use crate::routing::Router;
use crate::server;
use bytes::Bytes;
use std::sync::Arc;

/// In-process client over a router and middleware pipeline
///
/// Configured like a [`Server`](crate::Server), but `execute` feeds requests
/// straight into the pipeline instead of reading them from a socket.
pub struct TestClient {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
}

impl TestClient {
    pub fn new(router: impl Into<Router>) -> Self {
        Self {
            router: Arc::new(router.into()),
            middleware: MiddlewareRegistry::new(),
        }
    }

    /// Append middleware, mirroring `Server::middleware`
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    /// Run a request through the pipeline and return the response
    ///
    /// Both `Ok` and `Err` handler results are flattened into the response,
    /// exactly as the server does before writing to the wire.
    pub async fn execute(&self, request: Request) -> HttpResponse {
        let chain = self.middleware.to_chain();
        server::respond(self.router.clone(), &chain, request).await
    }

    /// Shorthand for a GET request with no headers or body
    pub async fn get(&self, path: &str) -> HttpResponse {
        self.execute(get(path)).await
    }

    /// Shorthand for a POST request with a JSON body
    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> HttpResponse {
        self.execute(post_json(path, body)).await
    }
}

/// Build a request with method, path and raw body
pub fn request(method: http::Method, path: &str, body: impl Into<Bytes>) -> Request {
    Request::new(
        http::Request::builder()
            .method(method)
            .uri(path)
            .body(body.into())
            .unwrap(),
    )
}

/// Build a GET request
pub fn get(path: &str) -> Request {
    request(http::Method::GET, path, Bytes::new())
}

/// Build an OPTIONS request, as a browser preflight would send
pub fn options(path: &str) -> Request {
    request(http::Method::OPTIONS, path, Bytes::new())
}

/// Build a POST request carrying a JSON value
pub fn post_json(path: &str, body: serde_json::Value) -> Request {
    post_json_text(path, &body.to_string())
}

/// Build a POST request that declares JSON without validating the text
///
/// Useful for exercising rejection of malformed bodies.
pub fn post_json_text(path: &str, body: &str) -> Request {
    Request::new(
        http::Request::builder()
            .method(http::Method::POST)
            .uri(path)
            .header("content-type", "application/json")
            .body(Bytes::from(body.to_string()))
            .unwrap(),
    )
}
