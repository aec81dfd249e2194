//! Database connection management

use sea_orm::{ConnectOptions, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;

use crate::database::config::DatabaseConfig;
use crate::error::Error;

/// Wrapper around SeaORM's DatabaseConnection
///
/// This provides a clonable, thread-safe connection pool that can be shared
/// across requests.
///
/// # Example
///
/// ```rust,ignore
/// let conn = DbConnection::connect(&config).await?;
///
/// // Use with SeaORM queries
/// let pets = Pet::find().all(conn.inner()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct DbConnection {
    inner: Arc<DatabaseConnection>,
}

impl DbConnection {
    /// Create a new database connection from config
    ///
    /// This establishes a connection pool using the provided configuration.
    /// For SQLite databases, this will automatically create the database file
    /// if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.url` is unset or the database cannot be
    /// reached within the configured timeout.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Error> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| Error::database("DATABASE_URL is not set"))?;

        let url = Self::normalize_sqlite_url(url);

        let mut opt = ConnectOptions::new(&url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .sqlx_logging(config.logging);

        let conn = sea_orm::Database::connect(opt)
            .await
            .map_err(|e| Error::database(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(conn),
        })
    }

    /// Rewrite `sqlite://` URLs so the database file is created on first use
    fn normalize_sqlite_url(url: &str) -> String {
        if !url.starts_with("sqlite://") {
            return url.to_string();
        }

        let path = url.trim_start_matches("sqlite://").trim_start_matches("./");

        // In-memory databases need no file handling
        if path.starts_with(":memory:") {
            return url.to_string();
        }

        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }

        format!("sqlite:{}?mode=rwc", path)
    }

    /// Get a reference to the underlying SeaORM connection
    ///
    /// Use this when you need to execute raw SeaORM queries.
    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }

    /// Check that the database still answers
    pub async fn ping(&self) -> Result<(), Error> {
        self.inner.ping().await.map_err(Error::from)
    }
}

impl AsRef<DatabaseConnection> for DbConnection {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.inner
    }
}

impl std::ops::Deref for DbConnection {
    type Target = DatabaseConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
