// Configuration module entry point
// Loads server, logging, performance, and HTTP settings for the serving glue

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from the default "config.toml" (if present),
    /// with `ROUTER_`-prefixed environment variables taking precedence.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("ROUTER"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
