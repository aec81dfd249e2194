use super::body::{parse_form, parse_json};
use crate::error::Error;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// HTTP Request wrapper providing convenient access to request data
///
/// The body is collected up front (bounded by the server's body size limit),
/// so accessors borrow instead of consuming the request. The `path` starts
/// out as the wire path and is rewritten to the group-relative remainder
/// when the request is delegated to a mounted router;
/// [`original_path`](Self::original_path) always returns the wire path.
pub struct Request {
    parts: http::request::Parts,
    body: Bytes,
    params: HashMap<String, String>,
    path: String,
    json: Option<serde_json::Value>,
}

impl Request {
    pub fn new(inner: http::Request<Bytes>) -> Self {
        let (parts, body) = inner.into_parts();
        Self::from_parts(parts, body)
    }

    pub fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        let path = parts.uri.path().to_string();
        Self {
            parts,
            body,
            params: HashMap::new(),
            path,
            json: None,
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Replace the routable path with a group-relative remainder
    pub(crate) fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Get the request method
    pub fn method(&self) -> &http::Method {
        &self.parts.method
    }

    /// Get the request path as seen by the matching router
    ///
    /// Inside a mounted group this is the remainder after the mount prefix,
    /// e.g. `/42` for a request to `/api/pets/42` mounted at `/api/pets`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the full path as it appeared on the wire
    pub fn original_path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Get a route parameter by name (e.g., /pets/{id})
    /// Returns Err if the parameter is missing, enabling use of `?` operator
    pub fn param(&self, name: &str) -> Result<&str, Error> {
        self.params
            .get(name)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::param(name))
    }

    /// Get all route parameters
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Get a header value by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the Content-Type header
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Check whether the request declares a JSON body
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false)
    }

    /// Get the raw request body
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Store the parsed JSON body
    ///
    /// Called by the JSON body middleware so handlers do not re-parse.
    pub fn set_json(&mut self, value: serde_json::Value) {
        self.json = Some(value);
    }

    /// Get the parsed JSON body, if the middleware stored one
    pub fn json_value(&self) -> Option<&serde_json::Value> {
        self.json.as_ref()
    }

    /// Parse the request body as JSON
    ///
    /// Reuses the value stored by the JSON body middleware when present.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(Deserialize)]
    /// struct CreatePet { name: String }
    ///
    /// pub async fn store(req: Request) -> Response {
    ///     let data: CreatePet = req.json()?;
    ///     // ...
    /// }
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        match &self.json {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| Error::InvalidJson(e.to_string())),
            None => parse_json(&self.body),
        }
    }

    /// Parse the request body as form-urlencoded
    pub fn form<T: DeserializeOwned>(&self) -> Result<T, Error> {
        parse_form(&self.body)
    }

    /// Parse the request body based on Content-Type header
    ///
    /// - `application/x-www-form-urlencoded` -> Form parsing
    /// - Otherwise -> JSON parsing (default)
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, Error> {
        match self.content_type() {
            Some(ct) if ct.starts_with("application/x-www-form-urlencoded") => self.form(),
            _ => self.json(),
        }
    }
}
