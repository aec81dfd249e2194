//! Community chat endpoints

use breeze::{Request, Response};
use serde::Deserialize;

use super::not_implemented;

#[derive(Debug, Deserialize)]
struct OutgoingMessage {
    #[allow(dead_code)]
    text: String,
}

/// GET /api/chat/messages
pub async fn messages(_request: Request) -> Response {
    not_implemented("chat.messages")
}

/// POST /api/chat/messages
pub async fn send(request: Request) -> Response {
    // Reject malformed payloads up front even though delivery is stubbed.
    let _message: OutgoingMessage = request.json()?;
    not_implemented("chat.send")
}
