//! Account registration, login and session lookup

use breeze::{AppError, Request, Response};

use super::not_implemented;

/// POST /api/auth/register
pub async fn register(_request: Request) -> Response {
    not_implemented("auth.register")
}

/// POST /api/auth/login
pub async fn login(_request: Request) -> Response {
    not_implemented("auth.login")
}

/// GET /api/auth/me
///
/// Sessions are not wired up yet, so there is never a current user.
pub async fn me(_request: Request) -> Response {
    Err(AppError::unauthorized("no active session").into())
}
