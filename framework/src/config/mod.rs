//! Configuration module
//!
//! This module provides configuration management including:
//! - Automatic `.env` file loading with environment-based precedence
//! - Type-safe configuration structs
//! - An explicit, immutable snapshot of all settings
//!
//! Configuration is loaded once at startup and handed to the parts of the
//! application that need it. There is no global registry; whoever needs a
//! setting receives it as a value.
//!
//! # Example
//!
//! ```rust,ignore
//! use breeze::Config;
//!
//! let config = Config::load(std::path::Path::new("."));
//! println!("Server port: {}", config.server.port);
//! ```

pub mod env;
pub mod server;

pub use env::{env, env_optional, env_required, load_dotenv, Environment};
pub use server::{ServerConfig, ServerConfigBuilder, DEFAULT_MAX_BODY_SIZE};

use std::path::Path;

use crate::database::DatabaseConfig;

/// Immutable snapshot of the application configuration
///
/// Built once at startup from `.env` files and process environment variables,
/// then shared by value (or behind an `Arc`) with everything that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
}

impl Config {
    /// Load `.env` files from the project root and build the snapshot
    ///
    /// This should be called at application startup, before creating the
    /// server. Environment variables already present in the process always
    /// win over values from `.env` files.
    ///
    /// # Arguments
    ///
    /// * `project_root` - Path to the project root where `.env` files are located
    pub fn load(project_root: &Path) -> Self {
        env::load_dotenv(project_root);
        Self::from_env()
    }

    /// Build the snapshot from the current process environment only
    ///
    /// Useful in tests or when `.env` loading is handled elsewhere.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
        }
    }
}
