//! Application context
//!
//! One value that carries everything bootstrap-time code hands to the rest
//! of the application: the configuration snapshot and the database handle.
//! Route groups receive the context (or pieces of it) when they are built,
//! so nothing reaches into process globals after startup.

use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::error::Error;

/// Shared application context
///
/// Cheap to clone; the configuration is behind an `Arc` and the database
/// handle shares one connection slot across all clones.
///
/// # Example
///
/// ```rust,ignore
/// use breeze::{AppContext, Config};
///
/// let ctx = AppContext::new(Config::load(std::path::Path::new(".")));
/// if let Err(err) = ctx.connect_database().await {
///     tracing::warn!(%err, "starting without a database");
/// }
/// let router = routes::register(&ctx);
/// ```
#[derive(Clone)]
pub struct AppContext {
    config: Arc<Config>,
    db: Database,
}

impl AppContext {
    /// Build a context from a configuration snapshot
    ///
    /// The database handle starts unconnected; call
    /// [`connect_database`](Self::connect_database) during bootstrap.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            db: Database::new(),
        }
    }

    /// Connect the database using the configured settings
    ///
    /// Safe to call more than once; only the first successful call connects.
    pub async fn connect_database(&self) -> Result<(), Error> {
        self.db.connect(&self.config.database).await
    }

    /// The configuration snapshot
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The shared database handle
    pub fn db(&self) -> &Database {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::database::DatabaseConfig;
    use pretty_assertions::assert_eq;

    fn test_config(url: Option<&str>) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                max_body_size: 1024,
                public_dir: "public".into(),
            },
            database: DatabaseConfig {
                url: url.map(String::from),
                max_connections: 1,
                min_connections: 1,
                connect_timeout: 5,
                logging: false,
            },
        }
    }

    #[tokio::test]
    async fn context_without_database_url_stays_degraded() {
        let ctx = AppContext::new(test_config(None));
        assert!(ctx.connect_database().await.is_err());
        assert!(!ctx.db().is_connected());
        assert_eq!(ctx.db().connection().unwrap_err().status_code(), 503);
    }

    #[tokio::test]
    async fn clones_observe_a_later_connection() {
        let ctx = AppContext::new(test_config(Some("sqlite::memory:")));
        let handle = ctx.db().clone();

        ctx.connect_database().await.unwrap();
        assert!(handle.is_connected());
        assert_eq!(ctx.config().server.port, 0);
    }
}
