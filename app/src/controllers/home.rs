//! Landing pages served straight from disk

use std::path::PathBuf;

use breeze::middleware::send_file;
use breeze::{Request, Response};

/// Resolve a page inside the crate's public directory
fn page(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("public")
        .join(name)
}

/// GET /
pub async fn index(_request: Request) -> Response {
    send_file(page("index.html")).await
}

/// GET /main
pub async fn main(_request: Request) -> Response {
    send_file(page("main.html")).await
}
