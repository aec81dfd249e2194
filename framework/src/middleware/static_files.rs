//! Static file serving
//!
//! Serves files from a configured directory for GET requests whose path maps
//! to an existing file. Anything else, including missing files and read
//! errors, falls through to the rest of the chain so the router still gets a
//! chance to answer.

use super::{Middleware, Next};
use crate::error::Error;
use crate::http::{HttpResponse, Request, Response};
use async_trait::async_trait;
use http::Method;
use std::path::{Component, Path, PathBuf};

/// Static file middleware
///
/// # Example
///
/// ```rust,ignore
/// Server::from_config(router, &config.server)
///     .middleware(StaticFiles::new(config.server.public_dir.clone()))
///     .run()
///     .await
/// ```
pub struct StaticFiles {
    root: PathBuf,
}

impl StaticFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a request path to a file under the root
    ///
    /// Percent escapes are decoded first, so `/my%20page.html` finds
    /// `my page.html` on disk. Rejects empty paths, escapes that decode to
    /// a separator or NUL, and any path with a non-normal component, so
    /// `..` can never escape the root.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let decoded = percent_decode(path)?;
        let rel = decoded.trim_start_matches('/');
        if rel.is_empty() {
            return None;
        }
        let rel = Path::new(rel);
        if rel.components().any(|c| !matches!(c, Component::Normal(_))) {
            return None;
        }
        Some(self.root.join(rel))
    }
}

/// Decode `%XX` escapes in a request path
///
/// Malformed escapes, escapes for a separator or NUL, and sequences that do
/// not form UTF-8 all yield `None`. An escaped `..` still decodes to a
/// parent component, which `resolve` rejects.
fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_digit(*bytes.get(i + 1)?)?;
            let lo = hex_digit(*bytes.get(i + 2)?)?;
            let decoded = hi << 4 | lo;
            if decoded == 0 || decoded == b'/' || decoded == b'\\' {
                return None;
            }
            out.push(decoded);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|v| v as u8)
}

#[async_trait]
impl Middleware for StaticFiles {
    async fn handle(&self, request: Request, next: Next<'_>) -> Response {
        if request.method() != Method::GET {
            return next.run(request).await;
        }

        let candidate = match self.resolve(request.path()) {
            Some(candidate) => candidate,
            None => return next.run(request).await,
        };

        match tokio::fs::read(&candidate).await {
            Ok(contents) => Ok(HttpResponse::bytes(contents, content_type_for(&candidate))),
            Err(_) => next.run(request).await,
        }
    }
}

/// Read a file and build a response with a matching content type
///
/// Unlike the middleware this does not fall through: a missing file becomes
/// a plain 404 and any other read failure a 500.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn index(_req: Request) -> Response {
///     send_file("public/index.html").await
/// }
/// ```
pub async fn send_file(path: impl AsRef<Path>) -> Response {
    let path = path.as_ref();
    match tokio::fs::read(path).await {
        Ok(contents) => Ok(HttpResponse::bytes(contents, content_type_for(path))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(HttpResponse::text("404 Not Found").status(404))
        }
        Err(e) => Err(Error::internal(format!("failed to read {}: {}", path.display(), e)).into()),
    }
}

/// Guess a content type from the file extension
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("pdf") => "application/pdf",
        Some("wasm") => "application/wasm",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{into_boxed, Endpoint, MiddlewareChain};
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    fn request(method: &str, path: &str) -> Request {
        Request::new(
            http::Request::builder()
                .method(method)
                .uri(path)
                .body(Bytes::new())
                .unwrap(),
        )
    }

    fn fallthrough_endpoint() -> Endpoint {
        Box::new(|_req| Box::pin(async { Err(HttpResponse::text("404 Not Found").status(404)) }))
    }

    fn chain_for(root: &Path) -> MiddlewareChain {
        let mut chain = MiddlewareChain::new();
        chain.extend([into_boxed(StaticFiles::new(root.to_path_buf()))]);
        chain
    }

    #[tokio::test]
    async fn serves_an_existing_file_with_its_content_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("styles.css"), "body { margin: 0 }").unwrap();

        let chain = chain_for(dir.path());
        let endpoint = fallthrough_endpoint();
        let response = chain
            .execute(request("GET", "/styles.css"), &endpoint)
            .await
            .unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(
            response.header_value("content-type"),
            Some("text/css; charset=utf-8")
        );
        assert_eq!(response.body().as_ref(), b"body { margin: 0 }");
    }

    #[tokio::test]
    async fn missing_files_fall_through() {
        let dir = tempfile::tempdir().unwrap();
        let chain = chain_for(dir.path());
        let endpoint = fallthrough_endpoint();

        let response = chain
            .execute(request("GET", "/missing.css"), &endpoint)
            .await
            .unwrap_err();
        assert_eq!(response.status_code(), 404);
    }

    #[tokio::test]
    async fn non_get_requests_fall_through_even_for_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.json"), "{}").unwrap();

        let chain = chain_for(dir.path());
        let endpoint = fallthrough_endpoint();
        let response = chain
            .execute(request("POST", "/data.json"), &endpoint)
            .await
            .unwrap_err();
        assert_eq!(response.status_code(), 404);
    }

    #[tokio::test]
    async fn parent_traversal_never_leaves_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        std::fs::create_dir(&public).unwrap();
        std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();

        let chain = chain_for(&public);
        let endpoint = fallthrough_endpoint();
        let response = chain
            .execute(request("GET", "/../secret.txt"), &endpoint)
            .await
            .unwrap_err();
        assert_eq!(response.status_code(), 404);
    }

    #[test]
    fn resolve_rejects_traversal_and_empty_paths() {
        let files = StaticFiles::new("public");
        assert_eq!(files.resolve("/"), None);
        assert_eq!(files.resolve("/../etc/passwd"), None);
        assert_eq!(files.resolve("/a/../../b"), None);
        assert_eq!(
            files.resolve("/css/site.css"),
            Some(PathBuf::from("public/css/site.css"))
        );
    }

    #[test]
    fn resolve_decodes_escapes_but_not_into_separators() {
        let files = StaticFiles::new("public");
        assert_eq!(
            files.resolve("/my%20page.html"),
            Some(PathBuf::from("public/my page.html"))
        );
        assert_eq!(files.resolve("/%2e%2e/secret.txt"), None);
        assert_eq!(files.resolve("/docs%2f..%2fsecret.txt"), None);
        assert_eq!(files.resolve("/docs%5C..%5Csecret.txt"), None);
        assert_eq!(files.resolve("/file%00.html"), None);
        assert_eq!(files.resolve("/broken%zz.html"), None);
        assert_eq!(files.resolve("/truncated%2"), None);
    }

    #[tokio::test]
    async fn percent_encoded_names_are_decoded_before_lookup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("my page.html"), "<p>hi</p>").unwrap();

        let chain = chain_for(dir.path());
        let endpoint = fallthrough_endpoint();
        let response = chain
            .execute(request("GET", "/my%20page.html"), &endpoint)
            .await
            .unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(
            response.header_value("content-type"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(response.body().as_ref(), b"<p>hi</p>");
    }

    #[tokio::test]
    async fn send_file_reports_missing_files_as_404() {
        let dir = tempfile::tempdir().unwrap();
        let err = send_file(dir.path().join("absent.html")).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn send_file_serves_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<h1>hello</h1>").unwrap();

        let response = send_file(&path).await.unwrap();
        assert_eq!(
            response.header_value("content-type"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(response.body().as_ref(), b"<h1>hello</h1>");
    }
}
