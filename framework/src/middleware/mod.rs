//! Middleware pipeline
//!
//! Middleware wrap the whole dispatch step: each stage receives the request
//! and a [`Next`] handle, and decides whether to pass the request on or to
//! answer it directly. Because routing itself sits at the end of the chain,
//! stages like CORS also decorate 404s and other fallback responses.
//!
//! Stages run in the order they are registered on the server:
//!
//! ```rust,ignore
//! Server::from_config(router, &config.server)
//!     .middleware(Cors::permissive())
//!     .middleware(JsonBody)
//!     .middleware(StaticFiles::new("public"))
//!     .run()
//!     .await
//! ```

mod cors;
mod json_body;
mod registry;
mod static_files;

pub use cors::Cors;
pub use json_body::JsonBody;
pub use registry::MiddlewareRegistry;
pub use static_files::{send_file, StaticFiles};

use crate::http::{Request, Response};
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A middleware stage in the request pipeline
///
/// Implementations either call `next.run(request)` to continue the chain or
/// return a response of their own to short-circuit it.
///
/// # Example
///
/// ```rust,ignore
/// use breeze::middleware::{Middleware, Next};
/// use breeze::{Request, Response};
///
/// pub struct RequestLog;
///
/// #[async_trait::async_trait]
/// impl Middleware for RequestLog {
///     async fn handle(&self, request: Request, next: Next<'_>) -> Response {
///         let path = request.original_path().to_string();
///         let response = next.run(request).await;
///         tracing::info!(path, "request");
///         response
///     }
/// }
/// ```
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next<'_>) -> Response;
}

/// Type-erased, shareable middleware
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// Wrap a middleware for storage in a registry or chain
pub fn into_boxed<M: Middleware + 'static>(middleware: M) -> BoxedMiddleware {
    Arc::new(middleware)
}

/// The terminal step of a chain, usually route dispatch
pub type Endpoint =
    Box<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// Handle to the remainder of the middleware chain
///
/// Passed to [`Middleware::handle`]; calling [`run`](Self::run) executes the
/// remaining stages and finally the endpoint.
pub struct Next<'a> {
    stack: &'a [BoxedMiddleware],
    endpoint: &'a Endpoint,
}

impl<'a> Next<'a> {
    /// Run the rest of the chain on `request`
    pub fn run(mut self, request: Request) -> Pin<Box<dyn Future<Output = Response> + Send + 'a>> {
        if let Some((current, rest)) = self.stack.split_first() {
            self.stack = rest;
            current.handle(request, self)
        } else {
            (self.endpoint)(request)
        }
    }
}

/// An ordered middleware stack ready to execute requests
pub struct MiddlewareChain {
    stack: Vec<BoxedMiddleware>,
}

impl MiddlewareChain {
    /// Create an empty chain; requests go straight to the endpoint
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Append already-boxed middleware to the chain
    pub fn extend(&mut self, middleware: impl IntoIterator<Item = BoxedMiddleware>) {
        self.stack.extend(middleware);
    }

    /// Run `request` through every stage and then the endpoint
    pub async fn execute(&self, request: Request, endpoint: &Endpoint) -> Response {
        Next {
            stack: &self.stack,
            endpoint,
        }
        .run(request)
        .await
    }
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        Self::new()
    }
}
