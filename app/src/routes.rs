//! Route table
//!
//! The API groups are mounted under their prefixes; each group registers
//! paths relative to its mount point, so the pets group serves
//! `/api/pets/{id}` by registering `/{id}`. The two page routes stay at the
//! top level.

use breeze::{AppContext, Router};

use crate::controllers::{auth, chat, home, pets};

pub fn register(ctx: &AppContext) -> Router {
    Router::new()
        .mount("/api/auth", auth_routes(ctx))
        .mount("/api/pets", pet_routes(ctx))
        .mount("/api/chat", chat_routes(ctx))
        .get("/", home::index)
        .get("/main", home::main)
}

fn auth_routes(_ctx: &AppContext) -> Router {
    Router::new()
        .post("/register", auth::register)
        .post("/login", auth::login)
        .get("/me", auth::me)
}

fn pet_routes(ctx: &AppContext) -> Router {
    let db = ctx.db().clone();
    Router::new()
        .get("/", move |req| pets::index(db.clone(), req))
        .get("/{id}", pets::show)
}

fn chat_routes(_ctx: &AppContext) -> Router {
    Router::new()
        .get("/messages", chat::messages)
        .post("/messages", chat::send)
}
