//! Cross-origin resource sharing
//!
//! Permissive by default: every response is stamped with
//! `Access-Control-Allow-Origin: *`, and OPTIONS preflights are answered
//! directly with `204 No Content` before the rest of the chain runs.

use super::{Middleware, Next};
use crate::http::{HttpResponse, Request, Response};
use async_trait::async_trait;
use http::Method;

const DEFAULT_ALLOW_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE";

/// CORS middleware
///
/// Runs first in a typical pipeline so that short-circuit responses from
/// later stages (JSON body rejections, 404s) still carry the CORS headers
/// a browser needs to read them.
pub struct Cors {
    allow_origin: String,
    allow_methods: String,
    allow_headers: Option<String>,
}

impl Cors {
    /// Allow any origin, the default method list, and requested headers
    pub fn permissive() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: DEFAULT_ALLOW_METHODS.to_string(),
            allow_headers: None,
        }
    }

    /// Restrict the allowed origin
    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.allow_origin = origin.into();
        self
    }

    /// Override the allowed methods announced on preflight
    pub fn allow_methods(mut self, methods: impl Into<String>) -> Self {
        self.allow_methods = methods.into();
        self
    }

    /// Announce a fixed header list instead of reflecting the request's
    pub fn allow_headers(mut self, headers: impl Into<String>) -> Self {
        self.allow_headers = Some(headers.into());
        self
    }

    fn decorate(&self, response: HttpResponse) -> HttpResponse {
        let response = response.header("Access-Control-Allow-Origin", self.allow_origin.as_str());
        if self.allow_origin != "*" {
            response.header("Vary", "Origin")
        } else {
            response
        }
    }

    fn preflight(&self, request: &Request) -> HttpResponse {
        let mut response = self
            .decorate(HttpResponse::new().status(204))
            .header("Access-Control-Allow-Methods", self.allow_methods.as_str());

        match &self.allow_headers {
            Some(fixed) => {
                response = response.header("Access-Control-Allow-Headers", fixed.as_str());
            }
            None => {
                // Reflect whatever the preflight asked for
                if let Some(requested) = request.header("access-control-request-headers") {
                    response = response
                        .header("Access-Control-Allow-Headers", requested)
                        .header("Vary", "Access-Control-Request-Headers");
                }
            }
        }

        response
    }
}

impl Default for Cors {
    fn default() -> Self {
        Self::permissive()
    }
}

#[async_trait]
impl Middleware for Cors {
    async fn handle(&self, request: Request, next: Next<'_>) -> Response {
        if request.method() == Method::OPTIONS {
            return Ok(self.preflight(&request));
        }

        match next.run(request).await {
            Ok(response) => Ok(self.decorate(response)),
            Err(response) => Err(self.decorate(response)),
        }
    }
}
