//! Pet listings

use breeze::http::json;
use breeze::{Database, Request, Response};

/// GET /api/pets
///
/// Listing pets needs the database; without a connection this answers 503.
pub async fn index(db: Database, _request: Request) -> Response {
    let conn = db.connection()?;
    conn.ping().await?;

    // No pet records exist yet, the table lands with the first migration.
    json(serde_json::json!({ "pets": [] }))
}

/// GET /api/pets/{id}
pub async fn show(request: Request) -> Response {
    let id = request.param("id")?;
    json(serde_json::json!({
        "id": id,
        "path": request.path(),
    }))
}
