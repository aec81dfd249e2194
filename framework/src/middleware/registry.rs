//! Middleware registry
//!
//! Holds the middleware a server will run, in registration order. The list
//! is explicit: it is built where the server is built, not through process
//! globals, so two servers in one process (or in one test binary) cannot
//! see each other's middleware.

use super::{into_boxed, BoxedMiddleware, Middleware, MiddlewareChain};

/// Ordered list of middleware that runs on every request
///
/// # Example
///
/// ```rust,ignore
/// Server::from_config(router, &config.server)
///     .middleware(Cors::permissive())
///     .middleware(JsonBody)
///     .run()
///     .await;
/// ```
pub struct MiddlewareRegistry {
    /// Middleware that runs on every request (in order)
    global: Vec<BoxedMiddleware>,
}

impl MiddlewareRegistry {
    /// Create a new empty middleware registry
    pub fn new() -> Self {
        Self { global: Vec::new() }
    }

    /// Append middleware that runs on every request
    ///
    /// Middleware runs in the order it is added.
    pub fn append<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.global.push(into_boxed(middleware));
        self
    }

    /// Build an executable chain from the registered middleware
    pub fn to_chain(&self) -> MiddlewareChain {
        let mut chain = MiddlewareChain::new();
        chain.extend(self.global.iter().cloned());
        chain
    }
}

impl Default for MiddlewareRegistry {
    fn default() -> Self {
        Self::new()
    }
}
