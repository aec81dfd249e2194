//! Pet community web service
//!
//! Serves the landing pages, static assets and the `/api/auth`, `/api/pets`
//! and `/api/chat` groups. The binary in `main.rs` wires these modules to a
//! server; integration tests drive the same wiring in process.

pub mod bootstrap;
pub mod controllers;
pub mod middleware;
pub mod routes;
