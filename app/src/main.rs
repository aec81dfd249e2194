use std::path::{Path, PathBuf};

use breeze::middleware::{Cors, JsonBody, StaticFiles};
use breeze::{AppContext, Config, Server};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use app::middleware::RequestLog;
use app::{bootstrap, routes};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "app=info,breeze=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load(Path::new("."));
    let ctx = AppContext::new(config);

    bootstrap::register(&ctx).await;

    let public_dir = anchor(&ctx.config().server.public_dir);
    let server_config = ctx.config().server.clone();

    Server::from_config(routes::register(&ctx), &server_config)
        .middleware(RequestLog)
        .middleware(Cors::permissive())
        .middleware(JsonBody)
        .middleware(StaticFiles::new(public_dir))
        .run()
        .await
        .expect("Failed to start server");
}

/// Resolve a relative asset directory against this crate rather than the
/// current working directory
fn anchor(dir: &str) -> PathBuf {
    let path = PathBuf::from(dir);
    if path.is_relative() {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(path)
    } else {
        path
    }
}
