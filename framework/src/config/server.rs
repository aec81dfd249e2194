use crate::config::env::env;

/// Maximum request body size when MAX_BODY_SIZE is not configured (10MB)
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Maximum request body size in bytes (default: 10MB)
    pub max_body_size: usize,
    /// Directory that static assets are served from
    pub public_dir: String,
}

impl ServerConfig {
    /// Build config from environment variables
    ///
    /// Reads HOST, PORT, MAX_BODY_SIZE and PUBLIC_DIR. Unset or unparseable
    /// values fall back to the defaults shown below.
    pub fn from_env() -> Self {
        Self {
            host: env("HOST", "0.0.0.0".to_string()),
            port: env("PORT", 8080),
            max_body_size: env("MAX_BODY_SIZE", DEFAULT_MAX_BODY_SIZE),
            public_dir: env("PUBLIC_DIR", "public".to_string()),
        }
    }

    /// Create a builder for customizing config
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Builder for ServerConfig
#[derive(Default)]
pub struct ServerConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
    max_body_size: Option<usize>,
    public_dir: Option<String>,
}

impl ServerConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the maximum request body size in bytes
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = Some(size);
        self
    }

    /// Set the static asset directory
    pub fn public_dir(mut self, dir: impl Into<String>) -> Self {
        self.public_dir = Some(dir.into());
        self
    }

    /// Build the ServerConfig
    pub fn build(self) -> ServerConfig {
        let default = ServerConfig::from_env();
        ServerConfig {
            host: self.host.unwrap_or(default.host),
            port: self.port.unwrap_or(default.port),
            max_body_size: self.max_body_size.unwrap_or(default.max_body_size),
            public_dir: self.public_dir.unwrap_or(default.public_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    fn clear_server_env() {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("MAX_BODY_SIZE");
        std::env::remove_var("PUBLIC_DIR");
    }

    #[test]
    #[serial]
    fn from_env_uses_defaults_when_nothing_is_set() {
        clear_server_env();
        let config = ServerConfig::from_env();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_body_size, DEFAULT_MAX_BODY_SIZE);
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    #[serial]
    fn from_env_reads_overrides() {
        clear_server_env();
        std::env::set_var("HOST", "127.0.0.1");
        std::env::set_var("PORT", "3000");
        std::env::set_var("PUBLIC_DIR", "assets");

        let config = ServerConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.public_dir, "assets");

        clear_server_env();
    }

    #[test]
    #[serial]
    fn unparseable_port_falls_back_to_default() {
        clear_server_env();
        std::env::set_var("PORT", "eight-thousand");
        assert_eq!(ServerConfig::from_env().port, 8080);
        clear_server_env();
    }

    #[test]
    #[serial]
    fn builder_overrides_only_what_it_is_given() {
        clear_server_env();
        let config = ServerConfig::builder()
            .host("127.0.0.1")
            .port(0)
            .build();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 0);
        assert_eq!(config.max_body_size, DEFAULT_MAX_BODY_SIZE);
        assert_eq!(config.public_dir, "public");
    }
}
