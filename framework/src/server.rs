use crate::config::{ServerConfig, DEFAULT_MAX_BODY_SIZE};
use crate::http::{collect_body, HttpResponse, Request, Response};
use crate::middleware::{Endpoint, Middleware, MiddlewareChain, MiddlewareRegistry};
use crate::routing::{RouteMatch, Router};
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

/// How long a shutting-down server waits for open connections
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP server
///
/// Owns the router and the middleware pipeline. The pipeline wraps route
/// dispatch itself, so middleware observe every response the server
/// produces, including 404s for unrouted paths.
///
/// # Example
///
/// ```rust,ignore
/// Server::from_config(router, &config.server)
///     .middleware(Cors::permissive())
///     .middleware(JsonBody)
///     .middleware(StaticFiles::new(config.server.public_dir.clone()))
///     .run()
///     .await
///     .expect("failed to start server");
/// ```
pub struct Server {
    router: Arc<Router>,
    middleware: MiddlewareRegistry,
    host: String,
    port: u16,
    max_body_size: usize,
}

impl Server {
    pub fn new(router: impl Into<Router>) -> Self {
        Self {
            router: Arc::new(router.into()),
            middleware: MiddlewareRegistry::new(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Build a server from a configuration snapshot
    pub fn from_config(router: impl Into<Router>, config: &ServerConfig) -> Self {
        Self {
            router: Arc::new(router.into()),
            middleware: MiddlewareRegistry::new(),
            host: config.host.clone(),
            port: config.port,
            max_body_size: config.max_body_size,
        }
    }

    /// Append middleware that runs on every request
    ///
    /// Middleware runs in the order it is added, around route dispatch.
    pub fn middleware<M: Middleware + 'static>(mut self, middleware: M) -> Self {
        self.middleware = self.middleware.append(middleware);
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the maximum accepted request body size in bytes
    pub fn max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    /// Bind the configured address and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the host does not parse or the port cannot be
    /// bound (for example when it is already in use). Startup errors are
    /// fatal; there is no silent fallback to another port.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let host: IpAddr = self.host.parse()?;
        let listener = TcpListener::bind(SocketAddr::new(host, self.port)).await?;
        self.serve(listener).await
    }

    /// Serve connections from an already-bound listener
    ///
    /// Useful in tests, which bind port 0 themselves to learn the real port
    /// before handing the listener over.
    ///
    /// On Ctrl-C the accept loop stops and in-flight connections get up to
    /// five seconds to finish before being aborted.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let local_addr = listener.local_addr()?;
        tracing::info!(port = local_addr.port(), "server listening on http://{}", local_addr);

        let router = self.router;
        let chain = Arc::new(self.middleware.to_chain());
        let max_body_size = self.max_body_size;

        let mut connections: JoinSet<()> = JoinSet::new();
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, _) = accepted?;
                    let io = TokioIo::new(stream);
                    let router = router.clone();
                    let chain = chain.clone();

                    connections.spawn(async move {
                        let service = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                            let router = router.clone();
                            let chain = chain.clone();
                            async move {
                                Ok::<_, Infallible>(
                                    handle_request(router, chain, max_body_size, req).await,
                                )
                            }
                        });

                        if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                            tracing::debug!(error = %err, "connection closed with error");
                        }
                    });
                }
                // Reap finished connection tasks; an unreaped task keeps its
                // entry in the set alive until `join_next` collects it.
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
                _ = &mut shutdown => {
                    tracing::info!("shutdown signal received, draining connections");
                    break;
                }
            }
        }

        drop(listener);
        let drain = async {
            while connections.join_next().await.is_some() {}
        };
        if tokio::time::timeout(DRAIN_TIMEOUT, drain).await.is_err() {
            tracing::warn!(
                remaining = connections.len(),
                "drain timed out, aborting open connections"
            );
            connections.shutdown().await;
        }

        Ok(())
    }
}

async fn handle_request(
    router: Arc<Router>,
    chain: Arc<MiddlewareChain>,
    max_body_size: usize,
    req: hyper::Request<hyper::body::Incoming>,
) -> hyper::Response<Full<Bytes>> {
    let (parts, body) = req.into_parts();
    let body = match collect_body(body, max_body_size).await {
        Ok(bytes) => bytes,
        Err(err) => return HttpResponse::from(err).into_hyper(),
    };

    let request = Request::from_parts(parts, body);
    respond(router, &chain, request).await.into_hyper()
}

/// Run one request through the middleware chain and route dispatch
///
/// Shared by the server and the in-process test client so both exercise the
/// same path.
pub(crate) async fn respond(
    router: Arc<Router>,
    chain: &MiddlewareChain,
    request: Request,
) -> HttpResponse {
    let endpoint = dispatch_endpoint(router);
    chain.execute(request, &endpoint).await.unwrap_or_else(|e| e)
}

/// Wrap route dispatch as the terminal step of a middleware chain
fn dispatch_endpoint(router: Arc<Router>) -> Endpoint {
    Box::new(move |request: Request| {
        let router = router.clone();
        Box::pin(async move { dispatch(&router, request).await })
    })
}

async fn dispatch(router: &Router, request: Request) -> Response {
    match router.match_route(request.method(), request.path()) {
        Some(RouteMatch {
            handler,
            params,
            path,
        }) => {
            let request = request.with_params(params).with_path(path);
            (handler.as_ref())(request).await
        }
        None => Err(HttpResponse::text("404 Not Found").status(404)),
    }
}
