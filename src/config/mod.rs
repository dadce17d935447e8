// Configuration module entry point
// Layered sources: optional config.toml, MESHDROP_-prefixed environment
// variables, then programmatic defaults.

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, ServerConfig, StorageConfig};

impl Config {
    /// Load configuration, reading `config.toml` when present.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific file path (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("MESHDROP"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("storage.upload_dir", "uploads")?
            .set_default("storage.static_root", ".")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Config for tests: defaults plus a caller-chosen upload directory.
#[cfg(test)]
pub fn test_config(upload_dir: &str) -> Config {
    let mut config = Config::load_from("nonexistent-test-config").unwrap();
    config.storage.upload_dir = upload_dir.to_string();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = Config::load_from("nonexistent-test-config").unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.storage.upload_dir, "uploads");
        assert_eq!(config.storage.static_root, ".");
        assert_eq!(config.http.max_body_size, 10_485_760);
        assert!(config.logging.access_log);
    }

    #[test]
    fn socket_addr_parses() {
        let config = Config::load_from("nonexistent-test-config").unwrap();
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn socket_addr_rejects_garbage_host() {
        let mut config = Config::load_from("nonexistent-test-config").unwrap();
        config.server.host = "not a host".to_string();
        assert!(config.socket_addr().is_err());
    }
}
