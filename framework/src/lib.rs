pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod testing;

pub use config::{Config, Environment, ServerConfig};
pub use context::AppContext;
pub use database::{Database, DatabaseConfig, DbConnection};
pub use error::{AppError, Error};
pub use http::{HttpResponse, Request, Response};
pub use middleware::{Cors, JsonBody, Middleware, Next, StaticFiles};
pub use routing::Router;
pub use server::Server;
