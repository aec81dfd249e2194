use crate::http::{Request, Response};
use matchit::Router as MatchitRouter;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for route handlers
pub type BoxedHandler =
    Box<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// A sub-router grafted onto a path prefix
struct Mount {
    prefix: String,
    inner: Arc<Router>,
}

/// HTTP router with per-method match tables and prefix mounts
///
/// Routes are registered with a builder-style API and the finished router is
/// immutable while serving. Mounted sub-routers own everything under their
/// prefix: the prefix is stripped before delegation, so a group registers
/// `/{id}` and serves `/api/pets/{id}` when mounted at `/api/pets`. A miss
/// inside a mount falls through to later mounts and to this router's own
/// routes.
///
/// # Example
///
/// ```rust,ignore
/// let pets = Router::new()
///     .get("/", pets::index)
///     .get("/{id}", pets::show);
///
/// let router = Router::new()
///     .mount("/api/pets", pets)
///     .get("/", home::index);
/// ```
pub struct Router {
    get_routes: MatchitRouter<Arc<BoxedHandler>>,
    post_routes: MatchitRouter<Arc<BoxedHandler>>,
    put_routes: MatchitRouter<Arc<BoxedHandler>>,
    delete_routes: MatchitRouter<Arc<BoxedHandler>>,
    /// Mounted sub-routers, consulted in registration order before own routes
    mounts: Vec<Mount>,
}

/// Result of a successful route match
pub struct RouteMatch {
    /// The handler to invoke
    pub(crate) handler: Arc<BoxedHandler>,
    /// Path parameters extracted by the matching pattern
    pub(crate) params: HashMap<String, String>,
    /// The path as seen by the router that matched, relative to its mount
    pub(crate) path: String,
}

impl RouteMatch {
    /// The mount-relative path that matched
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The extracted path parameters
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            get_routes: MatchitRouter::new(),
            post_routes: MatchitRouter::new(),
            put_routes: MatchitRouter::new(),
            delete_routes: MatchitRouter::new(),
            mounts: Vec::new(),
        }
    }

    /// Register a GET route
    pub fn get<H, Fut>(mut self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler = Box::new(move |req| Box::pin(handler(req)));
        self.get_routes.insert(path, Arc::new(handler)).ok();
        self
    }

    /// Register a POST route
    pub fn post<H, Fut>(mut self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler = Box::new(move |req| Box::pin(handler(req)));
        self.post_routes.insert(path, Arc::new(handler)).ok();
        self
    }

    /// Register a PUT route
    pub fn put<H, Fut>(mut self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler = Box::new(move |req| Box::pin(handler(req)));
        self.put_routes.insert(path, Arc::new(handler)).ok();
        self
    }

    /// Register a DELETE route
    pub fn delete<H, Fut>(mut self, path: &str, handler: H) -> Self
    where
        H: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: BoxedHandler = Box::new(move |req| Box::pin(handler(req)));
        self.delete_routes.insert(path, Arc::new(handler)).ok();
        self
    }

    /// Mount a sub-router under a path prefix
    ///
    /// The sub-router sees only the remainder of the path. A request to
    /// exactly the prefix is delegated as `/`. Mounts are consulted in the
    /// order they were registered.
    ///
    /// # Panics
    ///
    /// Panics if the prefix does not start with `/`. A trailing `/` is
    /// stripped, so `/api/pets` and `/api/pets/` are equivalent.
    pub fn mount(mut self, prefix: &str, router: impl Into<Router>) -> Self {
        assert!(
            prefix.starts_with('/'),
            "mount prefix must start with '/', got {:?}",
            prefix
        );
        self.mounts.push(Mount {
            prefix: prefix.trim_end_matches('/').to_string(),
            inner: Arc::new(router.into()),
        });
        self
    }

    /// Match a request and return the handler with extracted params
    ///
    /// Mounted sub-routers are tried first, in registration order, with the
    /// prefix stripped. A miss inside a mount is not final; matching falls
    /// through to the next candidate.
    pub fn match_route(&self, method: &http::Method, path: &str) -> Option<RouteMatch> {
        for mount in &self.mounts {
            if let Some(remainder) = strip_mount_prefix(path, &mount.prefix) {
                if let Some(matched) = mount.inner.match_route(method, &remainder) {
                    return Some(matched);
                }
            }
        }

        let table = match *method {
            http::Method::GET => &self.get_routes,
            http::Method::POST => &self.post_routes,
            http::Method::PUT => &self.put_routes,
            http::Method::DELETE => &self.delete_routes,
            _ => return None,
        };

        table.at(path).ok().map(|matched| {
            let params: HashMap<String, String> = matched
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            RouteMatch {
                handler: matched.value.clone(),
                params,
                path: path.to_string(),
            }
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a mount prefix, returning the path the sub-router should see
///
/// A request for exactly the prefix maps to `/`. The prefix must end on a
/// segment boundary: `/api/petstore` does not belong to `/api/pets`.
fn strip_mount_prefix(path: &str, prefix: &str) -> Option<String> {
    if prefix.is_empty() {
        return Some(path.to_string());
    }
    if path == prefix {
        return Some("/".to_string());
    }
    match path.strip_prefix(prefix) {
        Some(rest) if rest.starts_with('/') => Some(rest.to_string()),
        _ => None,
    }
}
