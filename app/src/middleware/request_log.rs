use std::time::Instant;

use async_trait::async_trait;
use breeze::{Middleware, Next, Request, Response};

/// Logs one line per request with method, path, status and timing
pub struct RequestLog;

#[async_trait]
impl Middleware for RequestLog {
    async fn handle(&self, request: Request, next: Next<'_>) -> Response {
        let method = request.method().clone();
        let path = request.original_path().to_string();
        let started = Instant::now();

        let response = next.run(request).await;

        let status = match &response {
            Ok(r) | Err(r) => r.status_code(),
        };
        tracing::info!(
            %method,
            path,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "handled request"
        );

        response
    }
}
