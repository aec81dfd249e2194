//! JSON body parsing middleware
//!
//! Parses the body of requests declaring `Content-Type: application/json`
//! and stores the parsed value on the request. A body that fails to parse is
//! rejected with `400 Bad Request` before any handler runs. Requests with
//! other content types pass through untouched.

use super::{Middleware, Next};
use crate::error::Error;
use crate::http::{Request, Response};
use async_trait::async_trait;

/// Eager JSON body parser
pub struct JsonBody;

#[async_trait]
impl Middleware for JsonBody {
    async fn handle(&self, mut request: Request, next: Next<'_>) -> Response {
        if request.is_json() && !request.body().is_empty() {
            match serde_json::from_slice(request.body()) {
                Ok(value) => request.set_json(value),
                Err(e) => return Err(Error::InvalidJson(e.to_string()).into()),
            }
        }
        next.run(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{text, HttpResponse};
    use crate::middleware::{into_boxed, Endpoint, MiddlewareChain};
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn json_request(body: &str) -> Request {
        Request::new(
            http::Request::builder()
                .method("POST")
                .uri("/api/chat/messages")
                .header("content-type", "application/json")
                .body(Bytes::from(body.to_string()))
                .unwrap(),
        )
    }

    fn chain() -> MiddlewareChain {
        let mut chain = MiddlewareChain::new();
        chain.extend([into_boxed(JsonBody)]);
        chain
    }

    fn echo_endpoint() -> Endpoint {
        Box::new(|req: Request| {
            Box::pin(async move {
                match req.json_value() {
                    Some(value) => Ok(HttpResponse::json(value.clone())),
                    None => text("no json"),
                }
            })
        })
    }

    #[tokio::test]
    async fn valid_json_is_parsed_once_and_shared_with_the_handler() {
        let endpoint = echo_endpoint();
        let response = chain()
            .execute(json_request(r#"{"text":"hi"}"#), &endpoint)
            .await
            .unwrap();
        assert_eq!(response.body().as_ref(), br#"{"text":"hi"}"#);
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_before_the_handler() {
        let endpoint: Endpoint = Box::new(|_req| Box::pin(async { panic!("must not dispatch") }));
        let response = chain()
            .execute(json_request(r#"{"text": nope"#), &endpoint)
            .await
            .unwrap_err();
        assert_eq!(response.status_code(), 400);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert!(body["error"].as_str().unwrap().contains("invalid JSON"));
    }

    #[tokio::test]
    async fn non_json_requests_pass_through_unparsed() {
        let endpoint = echo_endpoint();
        let req = Request::new(
            http::Request::builder()
                .method("POST")
                .uri("/upload")
                .header("content-type", "text/plain")
                .body(Bytes::from("{this is not json}"))
                .unwrap(),
        );
        let response = chain().execute(req, &endpoint).await.unwrap();
        assert_eq!(response.body().as_ref(), b"no json");
    }

    #[tokio::test]
    async fn empty_json_bodies_are_tolerated() {
        let endpoint = echo_endpoint();
        let response = chain().execute(json_request(""), &endpoint).await.unwrap();
        assert_eq!(response.body().as_ref(), b"no json");
    }
}
