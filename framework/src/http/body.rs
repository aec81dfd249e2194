//! Body parsing utilities for HTTP requests
//!
//! Provides async body collection with a size cap, plus parsing for JSON and
//! form-urlencoded data.

use crate::error::Error;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::Incoming;
use serde::de::DeserializeOwned;

/// Collect the full body from an Incoming stream, enforcing a size limit
///
/// Bodies larger than `limit` bytes produce [`Error::PayloadTooLarge`] (413)
/// without buffering the rest of the stream.
pub async fn collect_body(body: Incoming, limit: usize) -> Result<Bytes, Error> {
    Limited::new(body, limit)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                Error::PayloadTooLarge
            } else {
                Error::BodyRead(e.to_string())
            }
        })
}

/// Parse bytes as JSON into the target type
pub fn parse_json<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, Error> {
    serde_json::from_slice(bytes).map_err(|e| Error::InvalidJson(e.to_string()))
}

/// Parse bytes as form-urlencoded into the target type
pub fn parse_form<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, Error> {
    serde_urlencoded::from_bytes(bytes).map_err(|e| Error::InvalidForm(e.to_string()))
}
