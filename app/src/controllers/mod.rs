//! HTTP handlers, grouped by API surface

pub mod auth;
pub mod chat;
pub mod home;
pub mod pets;

use breeze::{HttpResponse, Response};

/// Placeholder for operations that are routed but not built yet
pub(crate) fn not_implemented(operation: &str) -> Response {
    HttpResponse::json(serde_json::json!({
        "error": "not implemented",
        "operation": operation,
    }))
    .status(501)
    .ok()
}
