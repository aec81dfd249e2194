//! Application bootstrap
//!
//! Runs once at startup, after configuration is loaded and before the
//! server starts accepting connections.

use breeze::AppContext;

/// Connect shared services
///
/// The database is optional at startup and connects in the background, so
/// route registration and the listener bind never wait on it. A failed
/// connection is logged and the server comes up anyway; database-backed
/// endpoints answer `503 Service Unavailable` until a connection exists.
pub async fn register(ctx: &AppContext) {
    let ctx = ctx.clone();
    tokio::spawn(async move {
        match ctx.connect_database().await {
            Ok(()) => tracing::info!("database connected"),
            Err(err) => tracing::warn!(%err, "database unavailable, continuing without it"),
        }
    });
}
